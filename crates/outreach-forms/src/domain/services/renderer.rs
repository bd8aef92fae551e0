//! Renderer/validator
//!
//! Given a schema and a bag of current answers, decides the input affordance
//! for every field, whether a field counts as answered, and whether the form
//! as a whole passes the required-field gate. Used for both the editor
//! preview and the public-facing render, so it never panics on malformed
//! stored values.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::domain::aggregates::FormSchema;
use crate::domain::registry::FieldType;
use crate::domain::value_objects::{FieldDefinition, MonthYear};

/// Input affordance class for a field type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    /// Single-line free text (text, email, number).
    FreeText,
    /// Multi-line free text.
    MultiLineText,
    /// Exactly one option (select, radio).
    SingleChoice,
    /// Zero or more options (checkbox).
    MultiChoice,
    /// Calendar date.
    DateInput,
    /// Composite month+year picker, two sub-selects joined by the
    /// `"YYYY-MM"` encoding on read/write.
    MonthYearInput,
    /// Render-only content; collects no answer.
    Display,
}

impl Affordance {
    pub fn for_field_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::Email | FieldType::Number => Self::FreeText,
            FieldType::Textarea => Self::MultiLineText,
            FieldType::Select | FieldType::Radio => Self::SingleChoice,
            FieldType::Checkbox => Self::MultiChoice,
            FieldType::Date => Self::DateInput,
            FieldType::MonthYear => Self::MonthYearInput,
            FieldType::Header | FieldType::Description | FieldType::Divider => Self::Display,
        }
    }
}

/// Everything the UI layer needs to render one field.
#[derive(Clone, Debug)]
pub struct FieldView<'a> {
    pub field: &'a FieldDefinition,
    pub affordance: Affordance,
    /// Placeholder, already filtered down to the types that accept one.
    pub placeholder: Option<&'a str>,
    /// Options to offer; empty for non-choice types and degraded gracefully
    /// for choice fields saved without options.
    pub options: &'a [String],
    /// Current answer, falling back to the field's default value.
    pub value: Value,
    /// Decoded month/year sub-picker state. `None` sub-values when the
    /// stored answer does not conform to the `"YYYY-MM"` encoding.
    pub month_year: Option<MonthYear>,
    pub blocks_submission: bool,
}

/// Read-only renderer over one schema.
pub struct FormRenderer<'a> {
    schema: &'a FormSchema,
}

impl<'a> FormRenderer<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        Self { schema }
    }

    /// Whether a raw answer counts as answered: non-empty string, non-empty
    /// array, or any other non-null value.
    pub fn is_answered(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }

    /// Per-field check: does this field, with the current answers, block
    /// submission? Display elements and optional fields never do.
    pub fn field_blocks_submission(
        field: &FieldDefinition,
        values: &HashMap<String, Value>,
    ) -> bool {
        if !field.is_required_input() {
            return false;
        }
        match values.get(&field.id) {
            Some(value) => !Self::is_answered(value),
            None => true,
        }
    }

    /// View model for one field of the schema.
    pub fn field_view(&self, field: &'a FieldDefinition, values: &HashMap<String, Value>) -> FieldView<'a> {
        let value = values
            .get(&field.id)
            .cloned()
            .or_else(|| field.default_value.clone().map(Value::String))
            .unwrap_or(Value::Null);

        let month_year = if field.field_type == FieldType::MonthYear {
            value.as_str().and_then(MonthYear::parse)
        } else {
            None
        };

        FieldView {
            field,
            affordance: Affordance::for_field_type(field.field_type),
            placeholder: if field.field_type.supports_placeholder() {
                field.placeholder.as_deref()
            } else {
                None
            },
            options: if field.field_type.supports_options() {
                &field.options
            } else {
                &[]
            },
            blocks_submission: Self::field_blocks_submission(field, values),
            value,
            month_year,
        }
    }

    /// View models for the whole schema, in field order.
    pub fn render(&self, values: &HashMap<String, Value>) -> Vec<FieldView<'a>> {
        self.schema.fields().iter().map(|f| self.field_view(f, values)).collect()
    }

    /// Whole-form gate used before accepting a submission: valid iff every
    /// required non-display field has an answered value.
    pub fn validate(&self, values: &HashMap<String, Value>) -> Result<(), RequiredFieldsError> {
        let missing: Vec<String> = self
            .schema
            .fields()
            .iter()
            .filter(|f| Self::field_blocks_submission(f, values))
            .map(|f| f.id.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RequiredFieldsError { missing })
        }
    }
}

/// Required fields left unanswered; carries the offending field ids so the
/// caller can highlight them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required fields not answered: {}", missing.join(", "))]
pub struct RequiredFieldsError {
    pub missing: Vec<String>,
}
