//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{FormStatus, FormType};
use crate::domain::value_objects::FieldDefinition;

/// Create-or-update command for a form. An absent id creates; a present id
/// updates in place, preserving created_at and created_by.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFormCommand {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: FormStatus,
    pub form_type: FormType,
    pub fields: Vec<FieldDefinition>,
    pub created_by: Option<String>,
}

/// Flattened read model for listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub status: FormStatus,
    pub form_type: FormType,
    pub field_count: usize,
}

impl From<&crate::domain::aggregates::FormSchema> for FormSummary {
    fn from(form: &crate::domain::aggregates::FormSchema) -> Self {
        Self {
            id: form.id().to_string(),
            title: form.title().to_string(),
            status: form.status(),
            form_type: form.form_type(),
            field_count: form.fields().len(),
        }
    }
}
