// models/src/prediction.rs

use serde::{Deserialize, Serialize};

pub const PREDICTION_DESCRIPTION: &str =
    "Predicted by local DecisionTree model trained on provided data.";
pub const PREDICTION_RECOMMENDATIONS: &str =
    "This is an automated prediction. Consult a healthcare professional for diagnosis.";

/// Confidence reported when the classifier cannot produce class probabilities.
pub const FALLBACK_CONFIDENCE: f64 = 90.0;

/// A confidence percentage in `[0, 100]` rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Converts a probability in `[0, 1]` into a rounded percentage.
    pub fn from_probability(probability: f64) -> Self {
        Self::from_percent(probability * 100.0)
    }

    /// Rounds and clamps a percentage. NaN collapses to zero.
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return Self(0.0);
        }
        let clamped = percent.clamp(0.0, 100.0);
        Self((clamped * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Response body of a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: String,
    pub confidence: Confidence,
    pub description: String,
    pub recommendations: String,
}

impl PredictionResult {
    /// Wraps a label and confidence with the fixed description and advice text.
    pub fn new(disease: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            disease: disease.into(),
            confidence,
            description: PREDICTION_DESCRIPTION.to_string(),
            recommendations: PREDICTION_RECOMMENDATIONS.to_string(),
        }
    }
}
