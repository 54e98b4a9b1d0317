//! Error types shared across StickHeat crates.

use std::path::PathBuf;

/// Top-level error type for StickHeat operations.
#[derive(Debug, thiserror::Error)]
pub enum StickheatError {
    #[error("Device error: {message}")]
    Device { message: String },

    /// Persisted heatmap data did not match the expected layout.
    #[error("Invalid heatmap data: expected {expected} bytes, got {actual}")]
    PersistenceFormat { expected: usize, actual: usize },

    /// A decoded cell violates the non-negative density invariant.
    #[error("Invalid heatmap data: cell {index} holds {value}")]
    PersistenceValue { index: usize, value: f32 },

    #[error("Heatmap I/O failed for {path}: {source}")]
    PersistenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StickheatError.
pub type StickheatResult<T> = Result<T, StickheatError>;

impl StickheatError {
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn persistence_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceIo {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from reading or writing a heatmap file.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::PersistenceFormat { .. } | Self::PersistenceValue { .. } | Self::PersistenceIo { .. }
        )
    }
}
