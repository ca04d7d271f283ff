//! Error types for orc-material

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MaterialError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// A factory was handed a kind outside the closed set. Caller bug.
    #[error("Unknown material kind: {0}")]
    Argument(String),

    /// Encoded material text could not be decoded.
    #[error("Illegal material string: {input:?} ({reason})")]
    Format { input: String, reason: String },
}

impl MaterialError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        MaterialError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
