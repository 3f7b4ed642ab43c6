//! The patch run itself.
//!
//! A run is strictly linear:
//! resolve -> read -> locate -> splice -> backup -> write -> verify.
//! Any locate failure stops the run before the backup, so a failed run
//! leaves the filesystem exactly as it found it. A backup failure stops it
//! before the write.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PatchConfig;
use crate::error::PatchResult;
use crate::locate::{find_bytes, locate, Located};
use crate::persist::{self, BackupOutcome, WriteOutcome};
use crate::report::{PatchEvent, Reporter};
use crate::resolve::resolve_command;
use crate::splice::{self, Splice};

/// Whether the marker survived the splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    MarkerRemoved,
    MarkerStillPresent,
}

impl Verification {
    fn of(contents: &[u8], marker: &str) -> Self {
        if find_bytes(contents, marker.as_bytes()).is_some() {
            Verification::MarkerStillPresent
        } else {
            Verification::MarkerRemoved
        }
    }
}

/// The pure part of a run: locate the call and build the new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedText {
    pub located: Located,
    pub splice: Splice,
    pub contents: Vec<u8>,
}

/// Locate the marked call in `text` and splice it out.
///
/// `text` is never modified; on error no output exists at all.
pub fn patch_text(text: &[u8], config: &PatchConfig) -> PatchResult<PatchedText> {
    let located = locate(text, &config.marker, &config.call_name, config.return_lookback)?;
    let splice = splice::plan(text, &located);
    let contents = splice::apply(text, &splice);
    Ok(PatchedText { located, splice, contents })
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit target; when absent the configured command is resolved.
    pub target: Option<PathBuf>,
    /// Stop after splicing: no backup, no write.
    pub dry_run: bool,
}

/// Everything a frontend needs to summarize a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOutcome {
    pub target: PathBuf,
    pub original_len: usize,
    pub located: Located,
    pub splice: Splice,
    /// `None` for a dry run.
    pub backup: Option<BackupOutcome>,
    /// `None` for a dry run.
    pub write: Option<WriteOutcome>,
    pub verification: Verification,
    /// Whether the current user may write the target (decides `sudo` in
    /// restore instructions).
    pub target_writable: bool,
    #[serde(skip)]
    pub original: Vec<u8>,
    #[serde(skip)]
    pub patched: Vec<u8>,
}

impl PatchOutcome {
    pub fn backup_path(&self) -> PathBuf {
        match &self.backup {
            Some(backup) => backup.path().to_path_buf(),
            None => persist::backup_path_for(&self.target),
        }
    }
}

/// Resolve the target path: the explicit one, or the command on `PATH`.
pub fn resolve_target(
    options: &RunOptions,
    config: &PatchConfig,
    reporter: &mut dyn Reporter,
) -> PatchResult<PathBuf> {
    match &options.target {
        Some(path) => Ok(path.clone()),
        None => resolve_command(&config.command, config.max_symlink_hops, reporter),
    }
}

/// Run the whole pipeline against one target.
pub fn run(
    config: &PatchConfig,
    options: &RunOptions,
    reporter: &mut dyn Reporter,
) -> PatchResult<PatchOutcome> {
    let target = resolve_target(options, config, reporter)?;
    run_on(&target, config, options.dry_run, reporter)
}

fn run_on(
    target: &Path,
    config: &PatchConfig,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> PatchResult<PatchOutcome> {
    reporter.report(PatchEvent::Reading { path: target.to_path_buf() });
    let original = persist::read_target(target)?;
    reporter.report(PatchEvent::FileSize { bytes: original.len() as u64 });

    let PatchedText { located, splice, contents } = patch_text(&original, config)?;
    reporter.report(PatchEvent::MarkerFound {
        marker: config.marker.clone(),
        position: located.marker_pos,
    });
    reporter.report(PatchEvent::CallFound { position: located.call_start });
    reporter.report(PatchEvent::CallEnds { position: located.call_end });
    if located.return_start.is_none() {
        reporter.report(PatchEvent::ReturnNotFound);
    }

    let context = splice::context_range(original.len(), &located);
    reporter.report(PatchEvent::ContextBefore { excerpt: splice::excerpt(&original, &context) });
    reporter.report(PatchEvent::ContextAfter { excerpt: splice::excerpt(&contents, &context) });
    reporter.report(PatchEvent::Spliced { kind: splice.kind });

    let (backup, write) = if dry_run {
        tracing::info!(path = %target.display(), "dry run; leaving files untouched");
        (None, None)
    } else {
        let backup = persist::ensure_backup(target)?;
        reporter.report(match &backup {
            BackupOutcome::Created(path) => PatchEvent::BackupCreated { path: path.clone() },
            BackupOutcome::AlreadyExists(path) => PatchEvent::BackupExists { path: path.clone() },
        });

        let write = persist::write_patched(target, &contents)?;
        reporter.report(match &write {
            WriteOutcome::InPlace { path } => PatchEvent::Written { path: path.clone() },
            WriteOutcome::Fallback { fallback, error } => PatchEvent::WriteFallback {
                path: target.to_path_buf(),
                fallback: fallback.clone(),
                message: error.clone(),
            },
        });
        (Some(backup), Some(write))
    };

    let verification = Verification::of(&contents, &config.marker);
    reporter.report(match verification {
        Verification::MarkerRemoved => PatchEvent::Verified,
        Verification::MarkerStillPresent => PatchEvent::MarkerStillPresent,
    });

    Ok(PatchOutcome {
        target: target.to_path_buf(),
        original_len: original.len(),
        located,
        splice,
        backup,
        write,
        verification,
        target_writable: persist::is_writable(target),
        original,
        patched: contents,
    })
}
