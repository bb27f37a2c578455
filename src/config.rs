//! Persistence settings.

use std::path::{Path, PathBuf};

/// Directory artifacts are written to when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "output/workflows";

/// Prefix of every artifact file name.
pub const DEFAULT_FILE_PREFIX: &str = "workflow";

/// Environment variable that overrides the output directory.
pub const OUTPUT_DIR_ENV: &str = "WORKFLOW_OUTPUT_DIR";

/// Where and under which name [`persist`](crate::persist) writes reports.
///
/// # Example
///
/// ```rust
/// use workflow_trace::PersistConfig;
///
/// let config = PersistConfig::default()
///     .with_output_dir("reports")
///     .with_file_prefix("research");
/// assert_eq!(config.output_dir().to_str(), Some("reports"));
/// assert_eq!(config.file_prefix(), "research");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistConfig {
    output_dir: PathBuf,
    file_prefix: String,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl PersistConfig {
    /// Defaults, with the output directory taken from `WORKFLOW_OUTPUT_DIR`
    /// when it is set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_output_dir_var(std::env::var(OUTPUT_DIR_ENV).ok())
    }

    fn from_output_dir_var(value: Option<String>) -> Self {
        let config = Self::default();
        match value {
            Some(dir) if !dir.trim().is_empty() => config.with_output_dir(dir),
            _ => config,
        }
    }

    /// Set the directory reports are written to.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the file name prefix (`{prefix}_{YYYYMMDD_HHMMSS}.{ext}`).
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }
}
