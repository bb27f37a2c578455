//! Error types for workflow tracking and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for timeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing or reading an artifact failed.
    #[error("I/O error at '{}': {}", .path.display(), .source)]
    Io {
        /// The directory or file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A step-kind tag that is not one of the known kinds.
    #[error("Unknown step kind '{0}'")]
    UnknownKind(String),

    /// A tracked agent failed while running.
    #[error("Execution error: {0}")]
    Execution(String),

    /// A generic error with a message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Message(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Message(msg.to_string())
    }
}

/// A specialized `Result` type for timeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = Error::io(
            "output/workflows",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("output/workflows"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn string_conversions_produce_messages() {
        let err: Error = "boom".into();
        assert!(matches!(err, Error::Message(ref m) if m == "boom"));
    }
}
