// models/src/vocabulary.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::VocabularyError;

/// Ordered list of known symptom names and their feature indices.
///
/// The order is the feature-column order of the training data, so an index
/// handed out here is exactly the column the classifier was fit on. A
/// vocabulary is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct SymptomVocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Builds a vocabulary from feature-column headers.
    ///
    /// # Errors
    /// Returns a `VocabularyError` if a name is empty or appears twice, since
    /// either would make the name→index mapping ambiguous.
    pub fn new(names: Vec<String>) -> Result<Self, VocabularyError> {
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(VocabularyError::EmptyName(position));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(VocabularyError::DuplicateSymptom(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    /// Index of `name`, or `None` for a symptom the training data never saw.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<SymptomVocabulary> for Vec<String> {
    fn from(vocabulary: SymptomVocabulary) -> Self {
        vocabulary.names
    }
}

impl TryFrom<Vec<String>> for SymptomVocabulary {
    type Error = VocabularyError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}
