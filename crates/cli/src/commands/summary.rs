use std::path::PathBuf;

use anyhow::Result;
use hide_hooks_core::persist::{BackupOutcome, WriteOutcome};
use hide_hooks_core::splice::SpliceKind;
use hide_hooks_core::{PatchOutcome, Verification};
use serde::Serialize;

use crate::commands::RestoreInstructions;
use crate::{sha256_file, sha256_hex};

/// Machine-readable summary printed by `--json`.
#[derive(Debug, Serialize)]
pub struct PatchSummary {
    pub target: PathBuf,
    pub dry_run: bool,
    pub original_size: usize,
    pub splice_kind: SpliceKind,
    pub marker_pos: usize,
    pub call_start: usize,
    pub call_end: usize,
    pub return_start: Option<usize>,
    pub backup: Option<BackupOutcome>,
    pub write: Option<WriteOutcome>,
    pub verification: Verification,
    pub original_sha256: String,
    pub patched_sha256: String,
    pub restore: Option<RestoreInstructions>,
    pub warnings: Vec<String>,
}

impl PatchSummary {
    /// Build the summary; the patched digest is taken from the written file
    /// when there is one.
    pub fn from_outcome(outcome: &PatchOutcome, warnings: Vec<String>) -> Result<Self> {
        let patched_sha256 = match &outcome.write {
            Some(write) => sha256_file(write.written_path())?,
            None => sha256_hex(&outcome.patched),
        };
        let restore = outcome.backup.as_ref().map(|backup| {
            RestoreInstructions::new(backup.path(), &outcome.target, outcome.target_writable)
        });

        Ok(Self {
            target: outcome.target.clone(),
            dry_run: outcome.write.is_none(),
            original_size: outcome.original_len,
            splice_kind: outcome.splice.kind,
            marker_pos: outcome.located.marker_pos,
            call_start: outcome.located.call_start,
            call_end: outcome.located.call_end,
            return_start: outcome.located.return_start,
            backup: outcome.backup.clone(),
            write: outcome.write.clone(),
            verification: outcome.verification,
            original_sha256: sha256_hex(&outcome.original),
            patched_sha256,
            restore,
            warnings,
        })
    }
}
