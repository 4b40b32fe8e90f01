// ABOUTME: Error types for the content detector, raised while loading or validating configuration.
// ABOUTME: Provides the DetectError enum with convenience constructors and boolean helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur before detection starts.
///
/// Detection itself never fails once a `Detector` has been built: degenerate
/// input degrades to neutral weights instead.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The configuration file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid YAML for the expected structure.
    #[error("invalid yaml configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration was not valid JSON for the expected structure.
    #[error("invalid json configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file extension is neither yaml nor json.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// The configuration parsed but holds values the detector cannot use.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DetectError {
    /// Creates an InvalidConfig error with a custom message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        DetectError::InvalidConfig(msg.into())
    }

    /// Creates an Io error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DetectError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the configuration content itself is at fault.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DetectError::Yaml(_)
                | DetectError::Json(_)
                | DetectError::UnsupportedFormat(_)
                | DetectError::InvalidConfig(_)
        )
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        matches!(self, DetectError::Io { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DetectError>;
