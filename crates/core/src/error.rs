use thiserror::Error;

/// Errors raised while building a patient directory
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmrError {
    #[error("Patient name must not be blank")]
    BlankName,

    #[error("Duplicate patient name: {0}")]
    DuplicateName(String),
}
