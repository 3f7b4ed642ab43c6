use std::path::Path;

use serde::Serialize;

/// Shell commands that undo a patch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreInstructions {
    pub restore: String,
    pub remove_backup: String,
}

impl RestoreInstructions {
    /// `sudo` is prepended when the target is not writable by the current user.
    pub fn new(backup: &Path, target: &Path, target_writable: bool) -> Self {
        let sudo = if target_writable { "" } else { "sudo " };
        Self {
            restore: format!("{sudo}cp \"{}\" \"{}\"", backup.display(), target.display()),
            remove_backup: format!("{sudo}rm \"{}\"", backup.display()),
        }
    }
}

pub fn print_restore_instructions(instructions: &RestoreInstructions) {
    let rule = "=".repeat(70);
    println!("\n{rule}");
    println!("HOW TO REVERT THIS CHANGE:");
    println!("{rule}");
    println!("\nRun this command to restore the original file:\n");
    println!("  {}", instructions.restore);
    println!("\nOr to permanently remove the backup:\n");
    println!("  {}", instructions.remove_backup);
    println!("\n{rule}");
}
