//! Request and response bodies for the prediction endpoint

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request fields in the column order the model is fed
pub const FEATURE_NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// One iris sample to classify
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

/// Prediction result returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_class: String,
}

/// A single offending request field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "field required")
    }

    fn not_a_float(field: &str) -> Self {
        Self::new(field, "value is not a valid float")
    }
}

impl PredictionRequest {
    /// Validate a decoded JSON body.
    ///
    /// Every field is checked so the caller sees all problems at once.
    /// Numbers and numeric strings are accepted; anything else, and any
    /// non-finite value, is rejected. Unknown keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let object = body
            .as_object()
            .ok_or_else(|| vec![FieldError::new("body", "expected a JSON object")])?;

        let mut values = [0.0; 4];
        let mut errors = Vec::new();
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            match parse_feature(object, name) {
                Ok(v) => *slot = v,
                Err(e) => errors.push(e),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let [sepal_length, sepal_width, petal_length, petal_width] = values;
        Ok(Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        })
    }

    /// Features in [`FEATURE_NAMES`] order
    pub fn to_feature_row(&self) -> [f64; 4] {
        [self.sepal_length, self.sepal_width, self.petal_length, self.petal_width]
    }

    /// Single-row matrix ready for the model
    pub fn to_array(&self) -> Array2<f64> {
        let row = self.to_feature_row();
        Array2::from_shape_fn((1, row.len()), |(_, j)| row[j])
    }
}

/// Decode a request body as JSON.
///
/// Bodies without a content type are treated as JSON; any other content type
/// must be `application/json` or an `application/*+json` variant.
pub fn decode_json_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Value, Vec<FieldError>> {
    if let Some(content_type) = content_type {
        if !is_json_content_type(content_type) {
            return Err(vec![FieldError::new(
                "body",
                format!("unsupported content type {:?}, expected application/json", content_type),
            )]);
        }
    }
    serde_json::from_slice(bytes)
        .map_err(|e| vec![FieldError::new("body", format!("invalid JSON: {}", e))])
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

fn parse_feature(object: &Map<String, Value>, name: &str) -> Result<f64, FieldError> {
    let value = match object.get(name) {
        None | Some(Value::Null) => return Err(FieldError::missing(name)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::not_a_float(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let body = json!({
            "sepal_length": 5.1,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2,
        });
        let request = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(request.to_feature_row(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn test_integers_and_numeric_strings_accepted() {
        let body = json!({
            "sepal_length": 5,
            "sepal_width": "3.5",
            "petal_length": " 1.4 ",
            "petal_width": 0,
            "comment": "ignored",
        });
        let request = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(request.to_feature_row(), [5.0, 3.5, 1.4, 0.0]);
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let body = json!({ "sepal_length": 5.1 });
        let errors = PredictionRequest::from_json(&body).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["sepal_width", "petal_length", "petal_width"]);
        assert!(errors.iter().all(|e| e.message == "field required"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let body = json!({
            "sepal_length": null,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2,
        });
        let errors = PredictionRequest::from_json(&body).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("sepal_length", "field required")]);
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        let body = json!({
            "sepal_length": "wide",
            "sepal_width": true,
            "petal_length": [1.4],
            "petal_width": "nan",
        });
        let errors = PredictionRequest::from_json(&body).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.message == "value is not a valid float"));
    }

    #[test]
    fn test_non_object_body_rejected() {
        let errors = PredictionRequest::from_json(&json!([5.1, 3.5, 1.4, 0.2])).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn test_decode_body_content_types() {
        let bytes = br#"{"sepal_length": 5.1}"#;
        assert!(decode_json_body(None, bytes).is_ok());
        assert!(decode_json_body(Some("application/json"), bytes).is_ok());
        assert!(decode_json_body(Some("Application/JSON; charset=utf-8"), bytes).is_ok());
        assert!(decode_json_body(Some("application/vnd.api+json"), bytes).is_ok());

        let errors = decode_json_body(Some("text/plain"), bytes).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn test_decode_body_rejects_malformed_json() {
        let errors = decode_json_body(None, b"not valid json").unwrap_err();
        assert_eq!(errors[0].field, "body");
        assert!(errors[0].message.starts_with("invalid JSON"));
    }

    #[test]
    fn test_to_array_keeps_field_order() {
        let request = PredictionRequest {
            sepal_length: 1.0,
            sepal_width: 2.0,
            petal_length: 3.0,
            petal_width: 4.0,
        };
        let x = request.to_array();
        assert_eq!(x.shape(), &[1, 4]);
        assert_eq!(x.row(0).to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
