// models/src/lib.rs

//! Shared data types for the symptom checker: the symptom vocabulary, feature
//! vectors, the prediction request envelope and the prediction result.

pub mod errors;
pub mod features;
pub mod prediction;
pub mod request;
pub mod vocabulary;

pub use errors::{RequestError, RequestResult, VocabularyError};
pub use features::FeatureVector;
pub use prediction::{Confidence, PredictionResult, FALLBACK_CONFIDENCE};
pub use request::PredictRequest;
pub use vocabulary::SymptomVocabulary;
