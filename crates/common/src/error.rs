//! Error types shared across SwipeKit crates.

/// Top-level error type for SwipeKit operations.
///
/// The stroke tracker itself is pure arithmetic and raises no errors;
/// this type serves the configuration surface and embedding applications.
#[derive(Debug, thiserror::Error)]
pub enum SwipekitError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SwipekitError.
pub type SwipekitResult<T> = Result<T, SwipekitError>;

impl SwipekitError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
