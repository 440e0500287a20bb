/// Convenience result type used across the crate.
pub type AudiogramResult<T> = Result<T, AudiogramError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum AudiogramError {
    /// Invalid user-provided props or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed subtitle document.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending block.
        line: usize,
        /// Human-readable reason.
        message: String,
    },

    /// Subtitle resource could not be retrieved.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The text measurement surface failed or returned an unusable width.
    #[error("measure error: {0}")]
    Measure(String),

    /// Errors while resolving frames against a prepared session.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AudiogramError {
    /// Build an [`AudiogramError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AudiogramError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Build an [`AudiogramError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build an [`AudiogramError::Measure`] value.
    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    /// Build an [`AudiogramError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build an [`AudiogramError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
