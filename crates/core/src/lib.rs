//! hide-hooks-core
//!
//! Core library for silencing the hook-success notice in a bundled CLI.
//!
//! The crate locates a marker string inside the bundle, finds the call
//! expression that renders it, splices that call out, and handles the
//! backup-then-overwrite file I/O around it.
//!
//! All substantive logic lives here so it is fully testable; frontends only
//! parse arguments and narrate the [`report::PatchEvent`]s they receive.

pub mod config;
pub mod error;
pub mod locate;
pub mod patch;
pub mod persist;
pub mod report;
pub mod resolve;
pub mod splice;

pub use config::PatchConfig;
pub use error::{PatchError, PatchResult};
pub use patch::{patch_text, run, PatchOutcome, RunOptions, Verification};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
