//! Value objects
//!
//! Immutable, validated domain primitives.

use serde::{Deserialize, Serialize};

use crate::domain::registry::FieldType;

/// Identifier value object for entities
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single question or display element within a form schema.
///
/// The id is stable across reorders and edits; only duplication mints a new
/// one. For display elements the label doubles as the rendered body text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub options: Vec<String>,
    pub default_value: Option<String>,
    /// Target attribute path on the contact profile, or an
    /// `employment.`-prefixed path on the employment record.
    pub mapped_field: Option<String>,
}

impl FieldDefinition {
    /// Create a fresh field of the given type with registry defaults.
    pub fn new(field_type: FieldType) -> Self {
        let spec = field_type.spec();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            field_type,
            label: spec.default_label.to_string(),
            placeholder: None,
            required: false,
            options: spec.seed_options.iter().map(|o| o.to_string()).collect(),
            default_value: None,
            mapped_field: None,
        }
    }

    pub fn is_display_element(&self) -> bool {
        self.field_type.is_display_element()
    }

    /// Whether the field participates in the required-field gate.
    pub fn is_required_input(&self) -> bool {
        self.required && !self.is_display_element()
    }

    /// Copy of this field under a freshly minted id. Everything else is
    /// carried over verbatim.
    pub fn duplicate(&self) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ..self.clone()
        }
    }

    /// Re-establish the type-driven invariants after an arbitrary edit:
    /// options exist only on option-bearing types, and display elements carry
    /// no required flag, placeholder or mapping target.
    pub fn normalize(&mut self) {
        if !self.field_type.supports_options() {
            self.options.clear();
        }
        if self.is_display_element() {
            self.required = false;
            self.placeholder = None;
            self.mapped_field = None;
        }
    }
}

/// Composite month+year value with the canonical `"YYYY-MM"` encoding.
///
/// The encoding is part of the platform contract: four-digit year, dash,
/// two-digit zero-padded month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn encode(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Parse the canonical encoding. Anything non-conforming yields `None`;
    /// callers degrade to empty sub-pickers rather than erroring.
    pub fn parse(value: &str) -> Option<Self> {
        let (year_part, month_part) = value.split_once('-')?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return None;
        }
        let year: i32 = year_part.parse().ok()?;
        let month: u32 = month_part.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_field_defaults() {
        let field = FieldDefinition::new(FieldType::Header);
        assert_eq!(field.label, "Section Header");
        assert!(!field.required);
        assert!(field.options.is_empty());

        let field = FieldDefinition::new(FieldType::Radio);
        assert_eq!(field.options, vec!["Option 1".to_string()]);
    }

    #[test]
    fn test_duplicate_mints_new_id() {
        let field = FieldDefinition::new(FieldType::Text);
        let copy = field.duplicate();
        assert_ne!(field.id, copy.id);
        assert_eq!(field.label, copy.label);
        assert_eq!(field.field_type, copy.field_type);
    }

    #[test]
    fn test_normalize_clears_options_on_non_choice_type() {
        let mut field = FieldDefinition::new(FieldType::Select);
        field.options = vec!["a".into(), "b".into(), "c".into()];
        field.field_type = FieldType::Text;
        field.normalize();
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_normalize_strips_display_element_attrs() {
        let mut field = FieldDefinition::new(FieldType::Text);
        field.required = true;
        field.mapped_field = Some("firstName".into());
        field.field_type = FieldType::Divider;
        field.normalize();
        assert!(!field.required);
        assert!(field.mapped_field.is_none());
        assert!(field.placeholder.is_none());
    }

    #[test]
    fn test_month_year_round_trip() {
        let my = MonthYear::new(2023, 11);
        assert_eq!(my.encode(), "2023-11");
        assert_eq!(MonthYear::parse("2023-11"), Some(my));
    }

    #[test]
    fn test_month_year_zero_padding() {
        assert_eq!(MonthYear::new(2024, 3).encode(), "2024-03");
        assert_eq!(MonthYear::parse("2024-03"), Some(MonthYear::new(2024, 3)));
    }

    #[test]
    fn test_month_year_rejects_garbage() {
        for bad in ["", "garbage", "2023", "2023-", "23-11", "2023-13", "2023-00", "2023-1", "20233-01"] {
            assert_eq!(MonthYear::parse(bad), None, "{bad:?} should not parse");
        }
    }
}
