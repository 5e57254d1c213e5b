//! Error type shared by the builder and both exporters

use std::path::PathBuf;

/// Errors produced while validating a wall or writing its artifacts.
#[derive(Debug, thiserror::Error)]
pub enum WallError {
    /// A configuration value is out of range. Reported before any geometry
    /// is computed or any file is touched.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Reading or writing a file failed. Never retried.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed for a reason other than I/O.
    #[error("Failed to encode layout image: {0}")]
    Image(#[from] image::ImageError),
}

impl WallError {
    /// Creates an invalid configuration error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, WallError>;
