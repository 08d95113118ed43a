use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single failed field check, as reported by the onboarding validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum NatalError {
    #[error("not initialized: run 'natal config init'")]
    NotInitialized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid zodiac sign: {0}")]
    InvalidSign(String),

    #[error("invalid subscription tier: {0}")]
    InvalidTier(String),

    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl NatalError {
    /// Field failures carried by a `Validation` error; empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            NatalError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, NatalError>;
