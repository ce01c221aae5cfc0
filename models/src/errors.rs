// models/src/errors.rs

pub use thiserror::Error;

/// Problems with a prediction request body. The display strings are the
/// messages returned to the caller, so they must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("symptoms must be a list")]
    SymptomsNotAList,
    #[error("request body must be valid JSON")]
    InvalidJson(String), // parser detail, logged but not echoed
    #[error("request body must be a JSON object")]
    NotAnObject,
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Problems building a symptom vocabulary from column headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("symptom name must not be empty (column {0})")]
    EmptyName(usize),
    #[error("duplicate symptom column: {0}")]
    DuplicateSymptom(String),
}
