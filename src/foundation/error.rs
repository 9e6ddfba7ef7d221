/// Convenience result type used across framefit.
pub type FramefitResult<T> = Result<T, FramefitError>;

/// Top-level error taxonomy used by scene, sync and loader APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramefitError {
    /// Invalid user-provided or persisted data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image resource could not be loaded or decoded.
    #[error("image load error: {0}")]
    Load(String),

    /// Errors when serializing or deserializing scene documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefitError {
    /// Build a [`FramefitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramefitError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`FramefitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FramefitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
