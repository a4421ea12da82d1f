pub mod task;
pub mod project;
pub mod workspace;
pub mod config;

pub use task::*;
pub use project::*;
pub use workspace::*;
pub use config::*;
