use std::io;

use thiserror::Error;

/// Library-wide error type for simplelocalize operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O failure tied to a specific path.
    #[error("Cannot access '{path}': {source}")]
    FileAccess {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Configuration issue: missing values, conflicting options, unreadable config file.
    #[error("{0}")]
    Configuration(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Server rejected the request ({status}): {message}")]
    ServerRejection { status: u16, message: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Downloaded bundle could not be unpacked.
    #[error("Cannot unpack translations archive: {0}")]
    Archive(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn file_access(path: impl AsRef<std::path::Path>, source: io::Error) -> Self {
        AppError::FileAccess { path: path.as_ref().display().to_string(), source }
    }

    /// Closest `io::ErrorKind` for this error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::FileAccess { source, .. } => source.kind(),
            AppError::Configuration(_) | AppError::ParseError { .. } => {
                io::ErrorKind::InvalidInput
            }
            AppError::Archive(_) => io::ErrorKind::InvalidData,
            AppError::Network(_) | AppError::ServerRejection { .. } => io::ErrorKind::Other,
        }
    }

    /// Whether the failure happened before anything was sent to the server.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Configuration(_))
    }
}
