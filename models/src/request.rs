// models/src/request.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{RequestError, RequestResult};

/// Body of `POST /predict` after validation.
///
/// The body is validated by hand rather than derived so that the lenient
/// rules hold: a missing `symptoms` field means "no symptoms", and array
/// entries that are not strings are skipped like unknown symptom names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

impl PredictRequest {
    pub fn new(symptoms: Vec<String>) -> Self {
        Self { symptoms }
    }

    /// Parses raw body bytes. Content type is not consulted.
    pub fn from_slice(body: &[u8]) -> RequestResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| RequestError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> RequestResult<Self> {
        let object = value.as_object().ok_or(RequestError::NotAnObject)?;
        let symptoms = match object.get("symptoms") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(_) => return Err(RequestError::SymptomsNotAList),
        };
        Ok(Self { symptoms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_treat_missing_field_as_empty() {
        let request = PredictRequest::from_value(&json!({})).unwrap();
        assert!(request.symptoms.is_empty());

        let request = PredictRequest::from_value(&json!({ "age": 40 })).unwrap();
        assert!(request.symptoms.is_empty());
    }

    #[test]
    fn should_reject_non_list_symptoms() {
        for bad in [json!("itching"), json!(3), json!(null), json!({ "a": 1 }), json!(true)] {
            let err = PredictRequest::from_value(&json!({ "symptoms": bad })).unwrap_err();
            assert_eq!(err, RequestError::SymptomsNotAList);
            assert_eq!(err.to_string(), "symptoms must be a list");
        }
    }

    #[test]
    fn should_skip_non_string_entries() {
        let request =
            PredictRequest::from_value(&json!({ "symptoms": ["itching", 4, null, ["x"], "cough"] }))
                .unwrap();
        assert_eq!(request.symptoms, vec!["itching".to_string(), "cough".to_string()]);
    }

    #[test]
    fn should_reject_bad_bodies() {
        assert!(matches!(
            PredictRequest::from_slice(b"{not json"),
            Err(RequestError::InvalidJson(_))
        ));
        assert_eq!(
            PredictRequest::from_slice(b"[\"itching\"]").unwrap_err(),
            RequestError::NotAnObject
        );
    }

    #[test]
    fn should_parse_bytes() {
        let request = PredictRequest::from_slice(br#"{"symptoms":["skin_rash"]}"#).unwrap();
        assert_eq!(request, PredictRequest::new(vec!["skin_rash".to_string()]));
    }
}
