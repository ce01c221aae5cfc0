// lib/src/predictor.rs

//! The immutable service context handed to request handlers: vocabulary,
//! encoder, trained classifier, and the way confidence is derived. Built once
//! at startup and shared behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use models::{Confidence, FeatureVector, PredictionResult, SymptomVocabulary, FALLBACK_CONFIDENCE};

use crate::classifier::Classifier;
use crate::dataset::TrainingDataset;
use crate::encoder::FeatureEncoder;
use crate::errors::Result;
use crate::training::{train, TrainingReport};

/// How a prediction's confidence is obtained, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceStrategy {
    /// Probability mass of the predicted class, as a percentage.
    ClassProbability,
    /// A constant percentage for classifiers without probability output.
    Fixed(f64),
}

pub struct Predictor {
    encoder: FeatureEncoder,
    classifier: Arc<dyn Classifier>,
    confidence: ConfidenceStrategy,
}

impl Predictor {
    pub fn new(vocabulary: SymptomVocabulary, classifier: Arc<dyn Classifier>) -> Self {
        let confidence = if classifier.supports_probabilities() {
            ConfidenceStrategy::ClassProbability
        } else {
            ConfidenceStrategy::Fixed(FALLBACK_CONFIDENCE)
        };
        info!(
            "Predictor ready: classifier={}, symptoms={}, classes={}, confidence={:?}",
            classifier.name(),
            vocabulary.len(),
            classifier.classes().len(),
            confidence
        );
        Self {
            encoder: FeatureEncoder::new(vocabulary),
            classifier,
            confidence,
        }
    }

    /// Trains a decision tree on `dataset` and wraps it.
    pub fn from_dataset(dataset: &TrainingDataset) -> Result<(Self, TrainingReport)> {
        let (classifier, report) = train(dataset)?;
        let predictor = Self::new(dataset.vocabulary().clone(), Arc::new(classifier));
        Ok((predictor, report))
    }

    /// Encodes `symptoms`, runs the classifier and builds the response body.
    pub fn predict<I, S>(&self, symptoms: I) -> PredictionResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let features = self.encoder.encode(symptoms);
        let disease = self.classifier.predict(&features);
        let confidence = self.confidence_for(&disease, &features);
        debug!(
            "Predicted '{}' ({:.2}%) from {} known symptoms",
            disease,
            confidence.value(),
            features.active_indices().count()
        );
        PredictionResult::new(disease, confidence)
    }

    pub fn encode<I, S>(&self, symptoms: I) -> FeatureVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.encoder.encode(symptoms)
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        self.encoder.vocabulary()
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn confidence_strategy(&self) -> ConfidenceStrategy {
        self.confidence
    }

    fn confidence_for(&self, disease: &str, features: &FeatureVector) -> Confidence {
        match self.confidence {
            ConfidenceStrategy::Fixed(percent) => Confidence::from_percent(percent),
            ConfidenceStrategy::ClassProbability => match self.classifier.predict_proba(features) {
                Some(probabilities) => {
                    Confidence::from_probability(class_probability(self.classes(), &probabilities, disease))
                }
                None => Confidence::from_percent(FALLBACK_CONFIDENCE),
            },
        }
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("classifier", &self.classifier.name())
            .field("symptoms", &self.vocabulary().len())
            .field("classes", &self.classes().len())
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// Probability of `disease`, or the largest probability when the label is
/// not among `classes`.
fn class_probability(classes: &[String], probabilities: &[f64], disease: &str) -> f64 {
    classes
        .iter()
        .position(|class| class == disease)
        .and_then(|index| probabilities.get(index).copied())
        .unwrap_or_else(|| probabilities.iter().copied().fold(0.0, f64::max))
}
