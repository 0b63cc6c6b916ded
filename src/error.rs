use std::path::PathBuf;
use thiserror::Error;

/// Error type for line-range patching
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Invalid range bounds: {message}")]
    InvalidRangeBounds { message: String },

    #[error("Invalid range order: to ({to}) is before from ({from})")]
    InvalidRangeOrder { from: usize, to: usize },

    #[error("Range out of bounds: to ({to}) exceeds line count ({len})")]
    RangeOutOfBounds { len: usize, to: usize },

    #[error("Failed to read {}: {source}", .path.display())]
    IoReadFailure {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    IoWriteFailure {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unsupported encoding: {label}")]
    UnsupportedEncoding { label: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl PatchError {
    /// Create a new invalid bounds error
    pub fn invalid_bounds(message: impl Into<String>) -> Self {
        Self::InvalidRangeBounds {
            message: message.into(),
        }
    }

    /// Create a new read failure with path context
    pub fn read_failure(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::IoReadFailure {
            source,
            path: path.into(),
        }
    }

    /// Create a new write failure with path context
    pub fn write_failure(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::IoWriteFailure {
            source,
            path: path.into(),
        }
    }

    pub fn unsupported_encoding(label: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            label: label.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable tag for machine consumers
    pub fn kind(&self) -> &'static str {
        match self {
            PatchError::InvalidRangeBounds { .. } => "invalid_range_bounds",
            PatchError::InvalidRangeOrder { .. } => "invalid_range_order",
            PatchError::RangeOutOfBounds { .. } => "range_out_of_bounds",
            PatchError::IoReadFailure { .. } => "io_read_failure",
            PatchError::IoWriteFailure { .. } => "io_write_failure",
            PatchError::UnsupportedEncoding { .. } => "unsupported_encoding",
            PatchError::Config { .. } => "config_error",
        }
    }

    /// True for range validation failures, which are raised before any I/O
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            PatchError::InvalidRangeBounds { .. }
                | PatchError::InvalidRangeOrder { .. }
                | PatchError::RangeOutOfBounds { .. }
        )
    }
}

impl From<serde_json::Error> for PatchError {
    fn from(error: serde_json::Error) -> Self {
        PatchError::config(error.to_string())
    }
}

impl From<serde_yaml::Error> for PatchError {
    fn from(error: serde_yaml::Error) -> Self {
        PatchError::config(error.to_string())
    }
}

impl From<toml::de::Error> for PatchError {
    fn from(error: toml::de::Error) -> Self {
        PatchError::config(error.to_string())
    }
}

/// Result type alias using PatchError
pub type PatchResult<T> = Result<T, PatchError>;

/// Contextual mapping for read-side I/O errors
pub fn map_read_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> PatchError {
    let path = path.into();
    move |err| PatchError::read_failure(err, path)
}

/// Contextual mapping for write-side I/O errors
pub fn map_write_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> PatchError {
    let path = path.into();
    move |err| PatchError::write_failure(err, path)
}
