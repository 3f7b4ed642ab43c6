pub mod console;
pub mod patch;
pub mod revert;
pub mod summary;

pub use console::*;
pub use patch::*;
pub use revert::*;
pub use summary::*;
