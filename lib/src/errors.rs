// lib/src/errors.rs

use thiserror::Error;

use models::errors::VocabularyError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Training dataset has no data rows")]
    EmptyDataset,

    #[error("Training dataset needs at least one symptom column and a label column")]
    NoFeatureColumns,

    #[error("Invalid symptom vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("Row {row}, column '{column}': expected 0 or 1, found '{value}'")]
    InvalidIndicator { row: usize, column: String, value: String },

    #[error("Row {row} has an empty diagnosis label")]
    MissingLabel { row: usize },

    #[error("Model training failed: {0}")]
    Training(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
