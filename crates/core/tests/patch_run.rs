use std::fs;

use hide_hooks_core::persist::{BackupOutcome, WriteOutcome};
use hide_hooks_core::report::{PatchEvent, RecordingReporter};
use hide_hooks_core::splice::SpliceKind;
use hide_hooks_core::{run, PatchConfig, PatchError, RunOptions, Verification};
use tempfile::tempdir;

const BUNDLE: &str =
    "function n(e){if(!e.ok)return null;return createElement(T,{dim:!0},e.name,' hook succeeded: ',e.out);}";

fn options(target: &std::path::Path) -> RunOptions {
    RunOptions { target: Some(target.to_path_buf()), dry_run: false }
}

#[test]
fn run_backs_up_writes_and_verifies() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, BUNDLE).unwrap();

    let mut reporter = RecordingReporter::new();
    let outcome = run(&PatchConfig::default(), &options(&target), &mut reporter).unwrap();

    assert_eq!(outcome.splice.kind, SpliceKind::ReturnConsumingSemicolon);
    assert_eq!(outcome.verification, Verification::MarkerRemoved);
    assert_eq!(outcome.backup, Some(BackupOutcome::Created(dir.path().join("cli.bak.js"))));
    assert_eq!(outcome.write, Some(WriteOutcome::InPlace { path: target.clone() }));
    assert!(outcome.target_writable);

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "function n(e){if(!e.ok)return null;return;}"
    );
    assert_eq!(fs::read_to_string(dir.path().join("cli.bak.js")).unwrap(), BUNDLE);
    assert!(reporter.contains(&PatchEvent::Verified));
    assert_eq!(reporter.warnings().count(), 0);
}

#[test]
fn second_run_fails_without_touching_backup() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, BUNDLE).unwrap();

    run(&PatchConfig::default(), &options(&target), &mut RecordingReporter::new()).unwrap();
    let patched = fs::read(&target).unwrap();

    let err =
        run(&PatchConfig::default(), &options(&target), &mut RecordingReporter::new()).unwrap_err();
    assert!(matches!(err, PatchError::MarkerNotFound(_)));
    assert_eq!(fs::read(&target).unwrap(), patched);
    assert_eq!(fs::read_to_string(dir.path().join("cli.bak.js")).unwrap(), BUNDLE);
}

#[test]
fn duplicate_marker_is_a_warning_not_an_error() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, format!("{BUNDLE} debug(' hook succeeded: ');")).unwrap();

    let mut reporter = RecordingReporter::new();
    let outcome = run(&PatchConfig::default(), &options(&target), &mut reporter).unwrap();

    assert_eq!(outcome.verification, Verification::MarkerStillPresent);
    assert!(reporter.contains(&PatchEvent::MarkerStillPresent));
    assert!(fs::read_to_string(&target).unwrap().ends_with("return;} debug(' hook succeeded: ');"));
}

#[test]
fn missing_return_is_reported_and_call_nulled() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, "x=[createElement(T,' hook succeeded: ')];").unwrap();

    let mut reporter = RecordingReporter::new();
    let outcome = run(&PatchConfig::default(), &options(&target), &mut reporter).unwrap();

    assert_eq!(outcome.splice.kind, SpliceKind::Null);
    assert!(reporter.contains(&PatchEvent::ReturnNotFound));
    assert_eq!(fs::read_to_string(&target).unwrap(), "x=[null];");
}

#[test]
fn locate_failure_leaves_no_trace() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, "return createElement(T,' hook succeeded: ', f(").unwrap();

    let err = run(&PatchConfig::default(), &options(&target), &mut RecordingReporter::new())
        .unwrap_err();
    assert!(matches!(err, PatchError::UnmatchedDelimiter { .. }));

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the untouched target should remain");
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "return createElement(T,' hook succeeded: ', f("
    );
}

/// An uncreatable backup aborts the run before the target is rewritten.
#[cfg(unix)]
#[test]
fn backup_failure_aborts_before_write() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, BUNDLE).unwrap();
    let backup = dir.path().join("cli.bak.js");
    std::os::unix::fs::symlink(dir.path().join("missing-dir").join("cli.bak.js"), &backup)
        .unwrap();

    let mut reporter = RecordingReporter::new();
    let err = run(&PatchConfig::default(), &options(&target), &mut reporter).unwrap_err();

    assert!(
        matches!(err, PatchError::BackupFailed { ref path, .. } if *path == backup),
        "unexpected error: {err}"
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), BUNDLE);
    assert!(!dir.path().join("cli.js.patched").exists());
    assert!(!reporter
        .events
        .iter()
        .any(|e| matches!(e, PatchEvent::Written { .. } | PatchEvent::WriteFallback { .. })));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, BUNDLE).unwrap();

    let opts = RunOptions { target: Some(target.clone()), dry_run: true };
    let outcome = run(&PatchConfig::default(), &opts, &mut RecordingReporter::new()).unwrap();

    assert!(outcome.backup.is_none());
    assert!(outcome.write.is_none());
    assert_eq!(outcome.verification, Verification::MarkerRemoved);
    assert_eq!(fs::read_to_string(&target).unwrap(), BUNDLE);
    assert!(!dir.path().join("cli.bak.js").exists());
}

#[test]
fn context_excerpts_bracket_the_splice() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cli.js");
    fs::write(&target, BUNDLE).unwrap();

    let mut reporter = RecordingReporter::new();
    run(&PatchConfig::default(), &options(&target), &mut reporter).unwrap();

    let before = reporter.events.iter().find_map(|e| match e {
        PatchEvent::ContextBefore { excerpt } => Some(excerpt.clone()),
        _ => None,
    });
    let after = reporter.events.iter().find_map(|e| match e {
        PatchEvent::ContextAfter { excerpt } => Some(excerpt.clone()),
        _ => None,
    });
    assert!(before.unwrap().starts_with("return createElement(T"));
    assert_eq!(after.unwrap(), "return;}");
}
