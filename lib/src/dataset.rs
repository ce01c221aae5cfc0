// lib/src/dataset.rs

//! Loading of the labeled training table.
//!
//! The table is a CSV export with one row per historical case: every column
//! but the last is a 0/1 symptom indicator, the last column is the diagnosis
//! label. Spreadsheet exports often carry a trailing comma, which shows up as
//! an unnamed, empty last column; such columns are dropped before the label
//! column is picked.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::{Array2, ArrayView2};
use tracing::{debug, info};

use models::SymptomVocabulary;

use crate::errors::{EngineError, Result};

/// Immutable training table: symptom vocabulary, 0/1 records and labels.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    vocabulary: SymptomVocabulary,
    records: Array2<f64>,
    labels: Vec<String>,
}

impl TrainingDataset {
    /// Reads and validates the CSV file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading training data from {}", path.display());
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Loaded training data from {}: {} rows, {} symptoms, {} distinct labels",
            path.display(),
            dataset.n_rows(),
            dataset.n_features(),
            dataset.distinct_labels()
        );
        Ok(dataset)
    }

    /// Reads and validates CSV data from any reader. The first line is the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let rows = csv_reader.records().collect::<std::result::Result<Vec<StringRecord>, _>>()?;

        let width = effective_width(&headers, &rows);
        if width < 2 {
            return Err(EngineError::NoFeatureColumns);
        }
        if rows.is_empty() {
            return Err(EngineError::EmptyDataset);
        }

        let label_column = width - 1;
        let vocabulary = SymptomVocabulary::new(headers[..label_column].to_vec())?;

        let mut records = Array2::<f64>::zeros((rows.len(), label_column));
        let mut labels = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let row_number = i + 1;
            if row.len() < width || filled_width(row) > width {
                return Err(EngineError::RaggedRow {
                    row: row_number,
                    found: row.len(),
                    expected: width,
                });
            }

            for (j, column) in vocabulary.names().iter().enumerate() {
                let cell = row.get(j).unwrap_or_default();
                records[[i, j]] = parse_indicator(cell).ok_or_else(|| EngineError::InvalidIndicator {
                    row: row_number,
                    column: column.clone(),
                    value: cell.to_string(),
                })?;
            }

            let label = row.get(label_column).unwrap_or_default();
            if label.is_empty() {
                return Err(EngineError::MissingLabel { row: row_number });
            }
            labels.push(label.to_string());
        }

        Ok(Self {
            vocabulary,
            records,
            labels,
        })
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn distinct_labels(&self) -> usize {
        let mut labels: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

/// Header count after dropping trailing columns that are unnamed and empty in every row.
fn effective_width(headers: &[String], rows: &[StringRecord]) -> usize {
    let mut width = headers.len();
    while width > 0
        && headers[width - 1].is_empty()
        && rows
            .iter()
            .all(|row| row.get(width - 1).map_or(true, str::is_empty))
    {
        width -= 1;
    }
    width
}

/// Number of cells up to and including the last non-empty one.
fn filled_width(row: &StringRecord) -> usize {
    (0..row.len())
        .rev()
        .find(|&i| row.get(i).is_some_and(|cell| !cell.is_empty()))
        .map_or(0, |last| last + 1)
}

fn parse_indicator(cell: &str) -> Option<f64> {
    let value: f64 = cell.parse().ok()?;
    (value == 0.0 || value == 1.0).then_some(value)
}
