// lib/src/training.rs

use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::classifier::{Classifier, DecisionTreeClassifier};
use crate::dataset::TrainingDataset;
use crate::errors::Result;

/// Share of rows held out for the accuracy check.
pub const TEST_FRACTION: f64 = 0.33;
/// Seed of the shuffle that decides the split.
pub const SPLIT_SEED: u64 = 42;

/// Row indices of the two halves of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n_rows` with a seeded RNG and holds out
/// `floor(n_rows * test_fraction)` rows. Rounding down keeps every row of a
/// tiny dataset in the training half.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> TrainTestSplit {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction.clamp(0.0, 1.0)).floor() as usize;
    let test = indices.split_off(n_rows - n_test);
    TrainTestSplit {
        train: indices,
        test,
    }
}

/// What happened during startup training; logged, never served.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// Accuracy on the held-out rows, `None` when nothing was held out.
    pub accuracy: Option<f64>,
    pub classes: usize,
    pub leaves: usize,
}

/// Splits `dataset` 67/33 with seed 42, fits a decision tree on the training
/// half and scores it on the held-out half.
pub fn train(dataset: &TrainingDataset) -> Result<(DecisionTreeClassifier, TrainingReport)> {
    let split = train_test_split(dataset.n_rows(), TEST_FRACTION, SPLIT_SEED);
    let records = dataset.records();
    let labels = dataset.labels();

    let train_records = records.select(Axis(0), &split.train);
    let train_labels: Vec<String> = split.train.iter().map(|&i| labels[i].clone()).collect();
    let test_records = records.select(Axis(0), &split.test);
    let test_labels: Vec<String> = split.test.iter().map(|&i| labels[i].clone()).collect();

    let classifier = DecisionTreeClassifier::fit(train_records.view(), &train_labels)?;
    let accuracy = classifier.accuracy(test_records.view(), &test_labels);

    let report = TrainingReport {
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        accuracy,
        classes: classifier.classes().len(),
        leaves: classifier.leaf_count(),
    };

    match report.accuracy {
        Some(accuracy) => info!(
            "Model trained on {} rows. Accuracy on {} held-out rows: {:.4}",
            report.train_rows, report.test_rows, accuracy
        ),
        None => info!(
            "Model trained on {} rows. No rows held out, accuracy not measured",
            report.train_rows
        ),
    }

    Ok((classifier, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::FeatureVector;
    use std::collections::BTreeSet;

    fn synthetic_csv(rows_per_label: usize) -> String {
        let mut csv = String::from("fever,cough,rash,itching,prognosis\n");
        for _ in 0..rows_per_label {
            csv.push_str("1,1,0,0,Flu\n");
            csv.push_str("0,0,1,1,Allergy\n");
            csv.push_str("1,0,1,0,Measles\n");
        }
        csv
    }

    #[test]
    fn split_should_be_deterministic_and_disjoint() {
        let first = train_test_split(100, TEST_FRACTION, SPLIT_SEED);
        let second = train_test_split(100, TEST_FRACTION, SPLIT_SEED);
        assert_eq!(first, second);
        assert_eq!(first.train.len(), 67);
        assert_eq!(first.test.len(), 33);

        let all: BTreeSet<usize> = first.train.iter().chain(first.test.iter()).copied().collect();
        assert_eq!(all.len(), 100);
    }

    #[test]
    fn split_should_keep_tiny_datasets_in_training() {
        let split = train_test_split(2, TEST_FRACTION, SPLIT_SEED);
        assert_eq!(split.train.len(), 2);
        assert!(split.test.is_empty());

        let split = train_test_split(0, TEST_FRACTION, SPLIT_SEED);
        assert!(split.train.is_empty() && split.test.is_empty());
    }

    #[test]
    fn should_train_and_report_accuracy() {
        let dataset = TrainingDataset::from_reader(synthetic_csv(10).as_bytes()).unwrap();
        let (classifier, report) = train(&dataset).unwrap();

        assert_eq!(report.train_rows + report.test_rows, 30);
        assert_eq!(report.test_rows, 9);
        assert_eq!(report.accuracy, Some(1.0));
        assert!(report.leaves >= 3);

        let mut flu = FeatureVector::zeros(4);
        flu.set(0);
        flu.set(1);
        assert_eq!(classifier.predict(&flu), "Flu");
    }

    #[test]
    fn should_skip_accuracy_without_held_out_rows() {
        let csv = "itching,skin_rash,prognosis\n1,0,Fungal infection\n0,1,Allergy\n";
        let dataset = TrainingDataset::from_reader(csv.as_bytes()).unwrap();
        let (classifier, report) = train(&dataset).unwrap();
        assert_eq!(report.train_rows, 2);
        assert_eq!(report.accuracy, None);
        assert_eq!(classifier.classes().len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["accuracy"], serde_json::Value::Null);
        assert_eq!(json["test_rows"], 0);
    }

    #[test]
    fn training_should_be_reproducible() {
        let dataset = TrainingDataset::from_reader(synthetic_csv(5).as_bytes()).unwrap();
        let (first, first_report) = train(&dataset).unwrap();
        let (second, second_report) = train(&dataset).unwrap();
        assert_eq!(first_report, second_report);

        let mut probe = FeatureVector::zeros(4);
        probe.set(2);
        assert_eq!(first.predict(&probe), second.predict(&probe));
        assert_eq!(first.predict_proba(&probe), second.predict_proba(&probe));
    }
}
