/// Result alias used at the scene and I/O boundary.
pub type StickResult<T> = Result<T, StickError>;

/// Errors raised while loading or validating scenes and writing frames.
///
/// The sequencing core never fails; it clamps. Only the JSON/CLI boundary produces errors.
#[derive(thiserror::Error, Debug)]
pub enum StickError {
    /// A scene or style value that cannot be clamped into a meaningful run.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Reading or writing a file or stream failed.
    #[error("io error: {0}")]
    Io(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickError {
    /// Build a [`StickError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StickError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StickError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
