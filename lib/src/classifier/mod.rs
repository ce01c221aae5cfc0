// lib/src/classifier/mod.rs

pub mod decision_tree;

pub use decision_tree::DecisionTreeClassifier;

use models::FeatureVector;

/// A trained, read-only classifier over binary symptom vectors.
///
/// Implementations are shared between request handlers, so they must be
/// `Send + Sync` and must not mutate themselves at inference time.
pub trait Classifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Known class labels, in the order `predict_proba` reports them.
    fn classes(&self) -> &[String];

    /// The label the model decides on for `features`.
    fn predict(&self, features: &FeatureVector) -> String;

    /// Whether `predict_proba` produces class probabilities. Callers check
    /// this once when wiring the classifier up, not per request.
    fn supports_probabilities(&self) -> bool {
        false
    }

    /// Probability per entry of `classes()`, or `None` when unsupported.
    fn predict_proba(&self, _features: &FeatureVector) -> Option<Vec<f64>> {
        None
    }
}
