use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("length mismatch in {context}: {details}")]
    LengthMismatch { context: String, details: String },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing artifact: {path}: {reason}")]
    MissingArtifact { path: PathBuf, reason: String },

    #[error("identifier {identifier} does not contain separator {separator:?}")]
    MalformedIdentifier {
        identifier: String,
        separator: String,
    },
}

impl EvalError {
    pub fn length_mismatch(context: &str, counts: &[(&str, usize)]) -> Self {
        let details = counts
            .iter()
            .map(|(label, count)| format!("{label}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        Self::LengthMismatch {
            context: context.to_string(),
            details,
        }
    }

    pub fn missing(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MissingArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
