// lib/src/classifier/decision_tree.rs

//! Decision-tree classifier backed by `linfa-trees`.
//!
//! linfa's tree only reports the winning label, so class probabilities are
//! recovered the usual way: every training row is routed to its leaf once at
//! fit time, and a query's probabilities are the class frequencies of the
//! leaf it lands in.

use std::collections::{BTreeSet, HashMap};

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::debug;

use models::FeatureVector;

use crate::classifier::Classifier;
use crate::errors::{EngineError, Result};

/// Route from the root to a leaf: `false` for left, `true` for right.
type LeafPath = Vec<bool>;

pub struct DecisionTreeClassifier {
    tree: DecisionTree<f64, usize>,
    classes: Vec<String>,
    n_features: usize,
    leaf_counts: HashMap<LeafPath, Vec<usize>>,
}

impl DecisionTreeClassifier {
    /// Fits a Gini tree of unlimited depth on `records` (one 0/1 row per case)
    /// and their `labels`.
    pub fn fit(records: ArrayView2<'_, f64>, labels: &[String]) -> Result<Self> {
        if records.nrows() == 0 {
            return Err(EngineError::Training("no training rows".to_string()));
        }
        if records.nrows() != labels.len() {
            return Err(EngineError::Training(format!(
                "{} records but {} labels",
                records.nrows(),
                labels.len()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let targets: Array1<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_else(|at| at))
            .collect();

        let dataset = Dataset::new(records.to_owned(), targets.clone());
        let tree: DecisionTree<f64, usize> = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(None)
            .fit(&dataset)
            .map_err(|e| EngineError::Training(e.to_string()))?;

        let mut classifier = Self {
            tree,
            n_features: records.ncols(),
            leaf_counts: HashMap::new(),
            classes,
        };

        let n_classes = classifier.classes.len();
        for (row, &target) in records.outer_iter().zip(targets.iter()) {
            let path = classifier.leaf_path(row);
            classifier
                .leaf_counts
                .entry(path)
                .or_insert_with(|| vec![0; n_classes])[target] += 1;
        }

        debug!(
            "Decision tree fit on {} rows: {} classes, {} leaves",
            records.nrows(),
            n_classes,
            classifier.leaf_count()
        );
        Ok(classifier)
    }

    /// Fraction of `labels` the tree reproduces, or `None` for an empty set.
    pub fn accuracy(&self, records: ArrayView2<'_, f64>, labels: &[String]) -> Option<f64> {
        if labels.is_empty() {
            return None;
        }
        let predicted: Array1<usize> = self.tree.predict(&records);
        let correct = predicted
            .iter()
            .zip(labels)
            .filter(|(index, label)| self.classes.get(**index) == Some(*label))
            .count();
        Some(correct as f64 / labels.len() as f64)
    }

    /// Number of leaves reached by at least one training row.
    pub fn leaf_count(&self) -> usize {
        self.leaf_counts.len()
    }

    fn record(&self, features: &FeatureVector) -> Array2<f64> {
        Array2::from_shape_fn((1, self.n_features), |(_, j)| {
            if features.is_set(j) { 1.0 } else { 0.0 }
        })
    }

    /// Walks the tree the same way linfa does when predicting: smaller than
    /// the split value goes left, everything else right.
    fn leaf_path(&self, row: ArrayView1<'_, f64>) -> LeafPath {
        let mut path = LeafPath::new();
        let Some(mut node) = self.tree.iter_nodes().next() else {
            return path;
        };

        while !node.is_leaf() {
            let (feature, split_value, _) = node.split();
            let mut children = node.children().into_iter();
            let left = children.next().and_then(|child| child.as_deref());
            let right = children.next().and_then(|child| child.as_deref());

            node = match (left, right) {
                (Some(left), _) if row[feature] < split_value => {
                    path.push(false);
                    left
                }
                (_, Some(right)) => {
                    path.push(true);
                    right
                }
                (Some(left), None) => {
                    path.push(false);
                    left
                }
                (None, None) => break,
            };
        }
        path
    }
}

impl Classifier for DecisionTreeClassifier {
    fn name(&self) -> &str {
        "decision_tree"
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> String {
        let record = self.record(features);
        let predicted: Array1<usize> = self.tree.predict(&record);
        predicted
            .iter()
            .next()
            .and_then(|index| self.classes.get(*index))
            .cloned()
            .unwrap_or_default()
    }

    fn supports_probabilities(&self) -> bool {
        true
    }

    fn predict_proba(&self, features: &FeatureVector) -> Option<Vec<f64>> {
        let record = self.record(features);
        let counts = self.leaf_counts.get(&self.leaf_path(record.row(0)))?;
        let total: usize = counts.iter().sum();
        if total == 0 {
            return None;
        }
        Some(counts.iter().map(|c| *c as f64 / total as f64).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn labels(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn vector(values: &[u8]) -> FeatureVector {
        let mut vector = FeatureVector::zeros(values.len());
        for (i, v) in values.iter().enumerate() {
            if *v == 1 {
                vector.set(i);
            }
        }
        vector
    }

    #[test]
    fn should_separate_two_cases() {
        let records = array![[1.0, 0.0], [0.0, 1.0]];
        let classifier =
            DecisionTreeClassifier::fit(records.view(), &labels(&["Fungal infection", "Allergy"]))
                .unwrap();

        assert_eq!(classifier.classes(), &["Allergy", "Fungal infection"]);
        assert_eq!(classifier.predict(&vector(&[1, 0])), "Fungal infection");
        assert_eq!(classifier.predict(&vector(&[0, 1])), "Allergy");
        assert_eq!(classifier.predict_proba(&vector(&[1, 0])), Some(vec![0.0, 1.0]));
        assert_eq!(classifier.predict_proba(&vector(&[0, 1])), Some(vec![1.0, 0.0]));
        assert_eq!(classifier.leaf_count(), 2);
    }

    #[test]
    fn should_report_leaf_frequencies_for_impure_leaf() {
        // Identical symptom rows with disagreeing labels cannot be split.
        let records = array![[1.0, 0.0], [1.0, 0.0], [1.0, 0.0]];
        let classifier =
            DecisionTreeClassifier::fit(records.view(), &labels(&["Flu", "Flu", "Cold"])).unwrap();

        assert_eq!(classifier.predict(&vector(&[1, 0])), "Flu");
        let proba = classifier.predict_proba(&vector(&[1, 0])).unwrap();
        assert_eq!(classifier.classes(), &["Cold", "Flu"]);
        assert!((proba[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((proba[1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let records = array![
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0]
        ];
        let classifier =
            DecisionTreeClassifier::fit(records.view(), &labels(&["A", "A", "B", "C", "C"])).unwrap();
        for row in [[0, 0, 0], [1, 1, 1], [0, 1, 0], [1, 0, 1]] {
            let proba = classifier.predict_proba(&vector(&row)).unwrap();
            assert_eq!(proba.len(), 3);
            assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn should_fit_single_class() {
        let records = array![[1.0, 0.0], [0.0, 1.0]];
        let classifier = DecisionTreeClassifier::fit(records.view(), &labels(&["Flu", "Flu"])).unwrap();
        assert_eq!(classifier.predict(&vector(&[0, 0])), "Flu");
        assert_eq!(classifier.predict_proba(&vector(&[0, 0])), Some(vec![1.0]));
    }

    #[test]
    fn should_measure_accuracy() {
        let records = array![[1.0, 0.0], [0.0, 1.0]];
        let classifier =
            DecisionTreeClassifier::fit(records.view(), &labels(&["Flu", "Cold"])).unwrap();

        let held_out = array![[1.0, 0.0], [0.0, 1.0]];
        assert_eq!(classifier.accuracy(held_out.view(), &labels(&["Flu", "Flu"])), Some(0.5));
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(classifier.accuracy(empty.view(), &[]), None);
    }

    #[test]
    fn should_reject_mismatched_input() {
        let records = array![[1.0, 0.0]];
        let err = DecisionTreeClassifier::fit(records.view(), &labels(&["A", "B"])).err().unwrap();
        assert!(matches!(err, EngineError::Training(_)));
    }
}
