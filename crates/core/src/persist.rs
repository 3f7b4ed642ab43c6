//! Backup-then-overwrite file I/O.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PatchError, PatchResult};

/// `<dir>/<stem>.bak<ext>`, e.g. `cli.js` -> `cli.bak.js`, `claude` -> `claude.bak`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.bak.{}", ext.to_string_lossy()),
        None => format!("{stem}.bak"),
    };
    path.with_file_name(name)
}

/// `<path>.patched`, written when the target itself cannot be overwritten.
pub fn patched_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".patched");
    PathBuf::from(name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum BackupOutcome {
    Created(PathBuf),
    /// A backup from an earlier run was left untouched.
    AlreadyExists(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BackupOutcome::Created(p) | BackupOutcome::AlreadyExists(p) => p,
        }
    }
}

/// Copy `original` to its backup path unless a backup already exists.
///
/// An existing backup is never overwritten, so the first original survives
/// any number of runs.
pub fn ensure_backup(original: &Path) -> PatchResult<BackupOutcome> {
    let backup = backup_path_for(original);
    if backup.exists() {
        return Ok(BackupOutcome::AlreadyExists(backup));
    }
    match fs::copy(original, &backup) {
        Ok(bytes) => {
            tracing::debug!(backup = %backup.display(), bytes, "backup created");
            Ok(BackupOutcome::Created(backup))
        }
        Err(source) => Err(PatchError::BackupFailed { path: backup, source }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome {
    InPlace { path: PathBuf },
    /// The target was not writable; the result lives at `fallback`.
    Fallback { fallback: PathBuf, error: String },
}

impl WriteOutcome {
    pub fn written_path(&self) -> &Path {
        match self {
            WriteOutcome::InPlace { path } => path,
            WriteOutcome::Fallback { fallback, .. } => fallback,
        }
    }
}

/// Overwrite `path` with `contents`, falling back once to `<path>.patched`.
pub fn write_patched(path: &Path, contents: &[u8]) -> PatchResult<WriteOutcome> {
    let err = match fs::write(path, contents) {
        Ok(()) => return Ok(WriteOutcome::InPlace { path: path.to_path_buf() }),
        Err(err) => err,
    };
    tracing::warn!(path = %path.display(), error = %err, "in-place write failed");

    let fallback = patched_path_for(path);
    match fs::write(&fallback, contents) {
        Ok(()) => Ok(WriteOutcome::Fallback { fallback, error: err.to_string() }),
        Err(source) => Err(PatchError::WriteFailed { path: path.to_path_buf(), fallback, source }),
    }
}

/// Whether the current user can open `path` for writing.
///
/// Opens without truncating, so the file is left as it is.
pub fn is_writable(path: &Path) -> bool {
    fs::OpenOptions::new().write(true).open(path).is_ok()
}

/// Read the whole target into memory.
pub fn read_target(path: &Path) -> PatchResult<Vec<u8>> {
    fs::read(path).map_err(|source| PatchError::FileRead { path: path.to_path_buf(), source })
}
