use hide_hooks_core::report::{PatchEvent, Reporter};

/// Human-readable line(s) for a patch event.
pub fn describe(event: &PatchEvent) -> String {
    match event {
        PatchEvent::FindingCommand { command } => format!("Finding {command} executable..."),
        PatchEvent::CommandFound { path } => format!("Found at: {}", path.display()),
        PatchEvent::SymlinkHop { link_target, resolved } => format!(
            "  -> Symlink points to: {}\n  -> Resolved to: {}",
            link_target.display(),
            resolved.display()
        ),
        PatchEvent::SymlinkError { path, message } => {
            format!("Error resolving symlink at {}: {message}", path.display())
        }
        PatchEvent::SymlinkCycleSuspected { max_hops } => {
            format!("Warning: Maximum symlink resolution depth reached ({max_hops} hops)")
        }
        PatchEvent::Resolved { path } => format!("Final resolved path: {}", path.display()),
        PatchEvent::Reading { path } => format!("\nReading file: {}", path.display()),
        PatchEvent::FileSize { bytes } => {
            format!("File size: {:.2} MB", *bytes as f64 / 1024.0 / 1024.0)
        }
        PatchEvent::MarkerFound { marker, position } => {
            format!("Found \"{marker}\" at position {position}")
        }
        PatchEvent::CallFound { position } => format!("Found call at position {position}"),
        PatchEvent::CallEnds { position } => format!("Call ends at position {position}"),
        PatchEvent::ReturnNotFound => {
            "Warning: Could not find return statement, replacing call with null".to_string()
        }
        PatchEvent::ContextBefore { excerpt } => format!("\nContext before replacement:\n{excerpt}"),
        PatchEvent::ContextAfter { excerpt } => format!("\nContext after replacement:\n{excerpt}"),
        PatchEvent::Spliced { kind } => format!("Replacement: {}", kind.replacement()),
        PatchEvent::BackupCreated { path } => format!("\nBackup created: {}", path.display()),
        PatchEvent::BackupExists { path } => format!("\nBackup already exists: {}", path.display()),
        PatchEvent::Written { path } => format!("\n✓ Patched file written to: {}", path.display()),
        PatchEvent::WriteFallback { path, fallback, message } => format!(
            "Error writing {}: {message}\nWrote to {} instead (you may need to copy it manually with sudo)",
            path.display(),
            fallback.display()
        ),
        PatchEvent::Verified => "✓ Success: Search string removed from file".to_string(),
        PatchEvent::MarkerStillPresent => "✗ Warning: Search string still exists in file".to_string(),
    }
}

/// Narrates events on the console: warnings to stderr, the rest to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: PatchEvent) {
        if event.is_warning() {
            eprintln!("{}", describe(&event));
        } else {
            println!("{}", describe(&event));
        }
    }
}
