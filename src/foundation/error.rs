/// Convenience result type used across dotmtx.
pub type DotmtxResult<T> = Result<T, DotmtxError>;

/// Top-level error type.
///
/// Oversized requests are not errors: the engine answers them with the fallback animation.
/// `Internal` marks a broken invariant inside the pipeline and should never surface for any
/// input.
#[derive(thiserror::Error, Debug)]
pub enum DotmtxError {
    /// Request or configuration validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pipeline invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),

    /// Encoding an animation (GIF, MP4, PNG) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotmtxError {
    /// Build a [`DotmtxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotmtxError::Internal`] value.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Build a [`DotmtxError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
