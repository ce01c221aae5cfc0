// lib/src/lib.rs

//! Disease-prediction engine: loads the labeled symptom table, trains a
//! decision tree once, and answers predictions from symptom lists.

pub mod classifier;
pub mod dataset;
pub mod encoder;
pub mod errors;
pub mod predictor;
pub mod training;

pub use crate::classifier::{Classifier, DecisionTreeClassifier};
pub use crate::dataset::TrainingDataset;
pub use crate::encoder::FeatureEncoder;
pub use crate::errors::*;
pub use crate::predictor::{ConfidenceStrategy, Predictor};
pub use crate::training::{train, train_test_split, TrainTestSplit, TrainingReport, SPLIT_SEED, TEST_FRACTION};
