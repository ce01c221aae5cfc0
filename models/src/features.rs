// models/src/features.rs

use serde::Serialize;

/// Binary presence/absence vector for one request, one slot per vocabulary
/// entry. Values are only ever 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<u8>);

impl FeatureVector {
    /// All-absent vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Marks the symptom at `index` as present. Out-of-range indices are
    /// ignored so a vector can never grow past its vocabulary.
    pub fn set(&mut self, index: usize) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = 1;
        }
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|v| *v == 1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Indices of present symptoms, ascending.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| (*v == 1).then_some(i))
    }
}
