//! Value objects for submissions and mapping
//!
//! Submitter identity, submission discriminators, and the coercion rules for
//! mapped answer values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target-path prefix routing a mapped field to the employment record rather
/// than the contact profile. Part of the platform contract.
pub const EMPLOYMENT_PREFIX: &str = "employment.";

/// Derived map from target attribute path to coerced answer value.
pub type MappedFields = HashMap<String, Value>;

/// Who submitted. Exactly one shape applies per submission: a named person
/// with an email (legacy intake types), an anonymous placeholder, or an
/// externally issued id resolvable against the contact directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitterIdentity {
    Named { name: String, email: String },
    Anonymous,
    External { external_id: String },
}

impl SubmitterIdentity {
    pub fn external_id(&self) -> Option<&str> {
        match self {
            Self::External { external_id } => Some(external_id),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

/// Discriminator for submission records. `FormResponse` carries schema-keyed
/// content; the remaining variants are legacy/ad-hoc intake types with fixed
/// semantic keys and possibly no owning form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionType {
    #[serde(rename = "form_response")]
    FormResponse,
    #[serde(rename = "event-rsvp")]
    EventRsvp,
    #[serde(rename = "volunteer")]
    Volunteer,
    #[serde(rename = "new-info")]
    NewInfo,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "update")]
    Update,
}

/// Review status. Monotonic by convention only; any status may be set from
/// any other, so reprocessing and reverting to pending both stay possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Reviewed,
    Processed,
    Archived,
}

/// Coerce a raw answer into one of string/number/bool/null. Arrays (checkbox
/// answers) flatten to a comma-joined string; any other shape falls back to
/// its JSON text.
pub fn coerce_answer(value: &Value) -> Value {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
        Value::Array(items) => {
            Value::String(items.iter().map(value_to_string).collect::<Vec<_>>().join(", "))
        }
        Value::Object(_) => Value::String(value.to_string()),
    }
}

/// String representation of a coerced value, for writing into text
/// attributes.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Boolean reading of a coerced value, for flags like `isCurrent`.
pub fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

/// Split a mapped-field map by the employment prefix. Employment keys come
/// back with the prefix stripped.
pub fn split_by_target(mapped: &MappedFields) -> (MappedFields, MappedFields) {
    let mut contact = MappedFields::new();
    let mut employment = MappedFields::new();
    for (key, value) in mapped {
        match key.strip_prefix(EMPLOYMENT_PREFIX) {
            Some(attr) => {
                employment.insert(attr.to_string(), value.clone());
            }
            None => {
                contact.insert(key.clone(), value.clone());
            }
        }
    }
    (contact, employment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_scalars_pass_through() {
        assert_eq!(coerce_answer(&json!("Jane")), json!("Jane"));
        assert_eq!(coerce_answer(&json!(42)), json!(42));
        assert_eq!(coerce_answer(&json!(true)), json!(true));
        assert_eq!(coerce_answer(&Value::Null), Value::Null);
    }

    #[test]
    fn test_coerce_array_joins() {
        assert_eq!(coerce_answer(&json!(["a", "b"])), json!("a, b"));
        assert_eq!(coerce_answer(&json!([1, "x"])), json!("1, x"));
    }

    #[test]
    fn test_coerce_object_falls_back_to_json_text() {
        let coerced = coerce_answer(&json!({"k": 1}));
        assert_eq!(coerced, json!("{\"k\":1}"));
    }

    #[test]
    fn test_split_by_target() {
        let mapped = MappedFields::from([
            ("firstName".to_string(), json!("Jane")),
            ("employment.jobTitle".to_string(), json!("Engineer")),
            ("employment.isCurrent".to_string(), json!(true)),
        ]);
        let (contact, employment) = split_by_target(&mapped);
        assert_eq!(contact.len(), 1);
        assert_eq!(contact["firstName"], json!("Jane"));
        assert_eq!(employment.len(), 2);
        assert_eq!(employment["jobTitle"], json!("Engineer"));
        assert_eq!(employment["isCurrent"], json!(true));
    }

    #[test]
    fn test_submission_type_tags() {
        assert_eq!(serde_json::to_string(&SubmissionType::FormResponse).unwrap(), "\"form_response\"");
        assert_eq!(serde_json::to_string(&SubmissionType::EventRsvp).unwrap(), "\"event-rsvp\"");
        assert_eq!(serde_json::to_string(&SubmissionType::NewInfo).unwrap(), "\"new-info\"");
    }

    #[test]
    fn test_value_to_bool() {
        assert!(value_to_bool(&json!(true)));
        assert!(value_to_bool(&json!("TRUE")));
        assert!(value_to_bool(&json!(1)));
        assert!(!value_to_bool(&json!("no")));
        assert!(!value_to_bool(&Value::Null));
    }
}
