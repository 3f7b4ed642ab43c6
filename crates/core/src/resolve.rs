//! Resolving the installed executable to the file that actually holds the
//! bundle.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PatchError, PatchResult};
use crate::report::{PatchEvent, Reporter};

/// Result of following a chain of symlinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Last path reached.
    pub path: PathBuf,
    /// Number of symlinks followed.
    pub hops: usize,
    /// True when the hop limit stopped resolution.
    pub limit_reached: bool,
}

/// Look up `command` on `PATH`, returning the first existing file.
pub fn find_in_path(command: &str) -> Option<PathBuf> {
    let executable = if cfg!(windows) { format!("{command}.exe") } else { command.to_string() };
    env::var_os("PATH").and_then(|paths| {
        env::split_paths(&paths).find_map(|p| {
            let candidate = p.join(&executable);
            if candidate.is_file() {
                Some(candidate)
            } else {
                None
            }
        })
    })
}

/// Follow symlinks starting at `start`, at most `max_hops` times.
///
/// Relative link targets are resolved against the link's own directory.
/// An unreadable link stops resolution where it is, with a warning event.
pub fn follow_symlinks(start: &Path, max_hops: usize, reporter: &mut dyn Reporter) -> Resolution {
    let mut path = start.to_path_buf();
    let mut hops = 0;

    while hops < max_hops {
        let link_target = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.file_type().is_symlink() => match fs::read_link(&path) {
                Ok(target) => target,
                Err(err) => {
                    reporter.report(PatchEvent::SymlinkError {
                        path: path.clone(),
                        message: err.to_string(),
                    });
                    break;
                }
            },
            Ok(_) => break,
            Err(err) => {
                reporter.report(PatchEvent::SymlinkError {
                    path: path.clone(),
                    message: err.to_string(),
                });
                break;
            }
        };

        let resolved = if link_target.is_absolute() {
            link_target.clone()
        } else {
            let parent = path.parent().unwrap_or_else(|| Path::new(""));
            normalize(&parent.join(&link_target))
        };
        tracing::debug!(from = %path.display(), to = %resolved.display(), "followed symlink");
        reporter.report(PatchEvent::SymlinkHop { link_target, resolved: resolved.clone() });
        path = resolved;
        hops += 1;
    }

    let limit_reached = hops >= max_hops;
    if limit_reached {
        reporter.report(PatchEvent::SymlinkCycleSuspected { max_hops });
    }
    Resolution { path, hops, limit_reached }
}

/// Find `command` on `PATH` and follow it to its final file.
pub fn resolve_command(
    command: &str,
    max_hops: usize,
    reporter: &mut dyn Reporter,
) -> PatchResult<PathBuf> {
    reporter.report(PatchEvent::FindingCommand { command: command.to_string() });
    let found =
        find_in_path(command).ok_or_else(|| PatchError::CommandNotFound(command.to_string()))?;
    reporter.report(PatchEvent::CommandFound { path: found.clone() });

    let resolution = follow_symlinks(&found, max_hops, reporter);
    reporter.report(PatchEvent::Resolved { path: resolution.path.clone() });
    Ok(resolution.path)
}

/// Lexically collapse `.` and `..` components without touching the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
