//! Progress reporting.
//!
//! The core never prints. Each step of a run is announced as a
//! [`PatchEvent`] to a [`Reporter`]; the CLI narrates them on the console
//! and tests record them.

use std::path::PathBuf;

use crate::splice::SpliceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEvent {
    /// Looking up the executable on `PATH`.
    FindingCommand { command: String },
    CommandFound { path: PathBuf },
    SymlinkHop { link_target: PathBuf, resolved: PathBuf },
    /// A symlink could not be inspected; resolution stops at `path`.
    SymlinkError { path: PathBuf, message: String },
    /// The hop limit was reached (possible cycle); resolution continues
    /// with the last path seen.
    SymlinkCycleSuspected { max_hops: usize },
    Resolved { path: PathBuf },
    Reading { path: PathBuf },
    FileSize { bytes: u64 },
    MarkerFound { marker: String, position: usize },
    CallFound { position: usize },
    CallEnds { position: usize },
    /// No `return` in the lookback window; the call becomes `null`.
    ReturnNotFound,
    ContextBefore { excerpt: String },
    ContextAfter { excerpt: String },
    Spliced { kind: SpliceKind },
    BackupCreated { path: PathBuf },
    BackupExists { path: PathBuf },
    Written { path: PathBuf },
    /// The in-place write failed; the result went to `fallback` instead.
    WriteFallback { path: PathBuf, fallback: PathBuf, message: String },
    /// The marker is gone from the written content.
    Verified,
    /// The marker still occurs somewhere in the written content.
    MarkerStillPresent,
}

impl PatchEvent {
    /// Whether this event should be surfaced as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            PatchEvent::SymlinkError { .. }
                | PatchEvent::SymlinkCycleSuspected { .. }
                | PatchEvent::ReturnNotFound
                | PatchEvent::WriteFallback { .. }
                | PatchEvent::MarkerStillPresent
        )
    }
}

/// Sink for patch progress events.
pub trait Reporter {
    fn report(&mut self, event: PatchEvent);
}

/// Keeps every event in order; handy for tests and for JSON summaries.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<PatchEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PatchEvent> {
        self.events.iter().filter(|e| e.is_warning())
    }

    pub fn contains(&self, event: &PatchEvent) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: PatchEvent) {
        self.events.push(event);
    }
}
