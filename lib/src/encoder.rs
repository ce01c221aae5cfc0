// lib/src/encoder.rs

use models::{FeatureVector, SymptomVocabulary};

/// Turns reported symptom names into the classifier's binary input.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    vocabulary: SymptomVocabulary,
}

impl FeatureEncoder {
    pub fn new(vocabulary: SymptomVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Sets one slot per known symptom name. Unknown names are skipped
    /// silently; repeated names are harmless.
    pub fn encode<I, S>(&self, symptoms: I) -> FeatureVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vector = FeatureVector::zeros(self.vocabulary.len());
        for name in symptoms {
            if let Some(index) = self.vocabulary.index_of(name.as_ref()) {
                vector.set(index);
            }
        }
        vector
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> FeatureEncoder {
        let names = ["itching", "skin_rash", "cough"].iter().map(|s| s.to_string()).collect();
        FeatureEncoder::new(SymptomVocabulary::new(names).unwrap())
    }

    #[test]
    fn should_encode_known_symptoms() {
        let vector = encoder().encode(["cough", "itching"]);
        assert_eq!(vector.as_slice(), &[1, 0, 1]);
    }

    #[test]
    fn should_encode_empty_list_as_zeros() {
        let vector = encoder().encode(Vec::<String>::new());
        assert_eq!(vector.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn unknown_symptoms_do_not_change_the_vector() {
        let encoder = encoder();
        let without = encoder.encode(["skin_rash"]);
        let with = encoder.encode(["skin_rash", "headache", "SKIN_RASH", ""]);
        assert_eq!(without, with);
    }

    #[test]
    fn duplicates_set_a_single_slot() {
        let vector = encoder().encode(["itching", "itching"]);
        assert_eq!(vector.as_slice(), &[1, 0, 0]);
    }
}
