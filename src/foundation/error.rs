/// Convenience result type used across Colibri.
pub type ColibriResult<T> = Result<T, ColibriError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ColibriError {
    /// Invalid user-provided configuration or model data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sprite decoding or sprite sizing failures.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while composing a frame for a tick.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ColibriError {
    /// Build a [`ColibriError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ColibriError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ColibriError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
