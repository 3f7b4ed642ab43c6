use std::path::Path;

use anyhow::{Context, Result};
use hide_hooks_core::report::RecordingReporter;
use hide_hooks_core::{run, PatchConfig, PatchOutcome, RunOptions};

use crate::absolute_from_current;
use crate::commands::{
    describe, print_restore_instructions, ConsoleReporter, PatchSummary, RestoreInstructions,
};

/// Patch the target (explicit `path`, or `config.command` resolved on PATH).
///
/// Errors propagate unchanged so `main` exits non-zero; a marker that
/// survives the splice is only a warning.
pub fn patch_command(
    path: Option<&str>,
    config: &PatchConfig,
    dry_run: bool,
    json: bool,
) -> Result<PatchOutcome> {
    let target = path.map(|p| absolute_from_current(Path::new(p))).transpose()?;
    let options = RunOptions { target, dry_run };

    if json {
        let mut reporter = RecordingReporter::new();
        let outcome = run(config, &options, &mut reporter).context("Patch failed")?;
        let warnings = reporter.warnings().map(describe).collect();
        let summary = PatchSummary::from_outcome(&outcome, warnings)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(outcome);
    }

    let outcome = run(config, &options, &mut ConsoleReporter).context("Patch failed")?;

    if dry_run {
        println!("\nDry run: no files were changed.");
        return Ok(outcome);
    }

    println!("\nDone!");
    let instructions = RestoreInstructions::new(
        &outcome.backup_path(),
        &outcome.target,
        outcome.target_writable,
    );
    print_restore_instructions(&instructions);

    Ok(outcome)
}
