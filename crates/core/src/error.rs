use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for every fatal outcome of a patch run.
///
/// Warnings (a suspected symlink cycle, a marker that survives the splice)
/// are reported as events instead.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The executable could not be found on `PATH`.
    #[error("Could not find '{0}' on PATH")]
    CommandNotFound(String),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Search string not found: {0:?}")]
    MarkerNotFound(String),

    /// No `<name>(` prefix encloses the marker.
    #[error("Could not find a {0:?} call enclosing the search string")]
    CallPrefixNotFound(String),

    /// The text ended before the call's closing parenthesis.
    #[error("Could not find end of call starting at byte {call_start}")]
    UnmatchedDelimiter { call_start: usize },

    /// The backup could not be created; nothing has been modified.
    #[error("Could not create backup at {path} (aborting to avoid data loss): {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Both the in-place write and the `.patched` fallback failed.
    #[error("Failed to write {path} and fallback {fallback}: {source}")]
    WriteFailed {
        path: PathBuf,
        fallback: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convenience result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
