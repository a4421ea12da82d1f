//! Session-level state: which screen is active, what it focuses, and the
//! intent contract presentation surfaces use to drive the core.

pub mod intent;
pub mod session;
pub mod snapshot;
pub mod view;

pub use intent::{Intent, Outcome};
pub use session::{ErrorKind, IntentError, Session};
pub use snapshot::Snapshot;
pub use view::{Controller, NavTarget, Screen};
