//! In-memory task and project tracker core.
//!
//! `model` holds the entities, `ops` mutates and indexes them, and `app`
//! drives screen navigation for whatever surface sits on top. The `td`
//! binary in `cli` is one such surface.

pub mod app;
pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod util;
