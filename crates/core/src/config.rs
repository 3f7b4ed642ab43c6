use serde::{Deserialize, Serialize};

/// Marker rendered next to every successful hook run.
pub const DEFAULT_MARKER: &str = " hook succeeded: ";

/// Name of the call expression that renders the marker.
pub const DEFAULT_CALL_NAME: &str = "createElement";

/// Executable looked up on `PATH` when no explicit target is given.
pub const DEFAULT_COMMAND: &str = "claude";

/// How far (in bytes) before the call we look for a `return` keyword.
pub const DEFAULT_RETURN_LOOKBACK: usize = 100;

/// Upper bound on symlink hops followed while resolving the command.
pub const DEFAULT_MAX_SYMLINK_HOPS: usize = 10;

/// Serializable configuration describing one patch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Literal text used to find the target call.
    pub marker: String,
    /// Function name whose call expression encloses the marker.
    pub call_name: String,
    /// Executable to resolve when the caller does not pass a path.
    pub command: String,
    /// Lookback window for the `return` keyword.
    #[serde(default = "default_lookback")]
    pub return_lookback: usize,
    /// Maximum symlink hops before resolution gives up with a warning.
    #[serde(default = "default_max_hops")]
    pub max_symlink_hops: usize,
}

fn default_lookback() -> usize {
    DEFAULT_RETURN_LOOKBACK
}

fn default_max_hops() -> usize {
    DEFAULT_MAX_SYMLINK_HOPS
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            call_name: DEFAULT_CALL_NAME.to_string(),
            command: DEFAULT_COMMAND.to_string(),
            return_lookback: DEFAULT_RETURN_LOOKBACK,
            max_symlink_hops: DEFAULT_MAX_SYMLINK_HOPS,
        }
    }
}

impl PatchConfig {
    /// Override the marker string.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Override the call expression name.
    pub fn with_call_name(mut self, call_name: impl Into<String>) -> Self {
        self.call_name = call_name.into();
        self
    }

    /// Override the command resolved on `PATH`.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Override the `return` lookback window.
    pub fn with_return_lookback(mut self, return_lookback: usize) -> Self {
        self.return_lookback = return_lookback;
        self
    }
}
