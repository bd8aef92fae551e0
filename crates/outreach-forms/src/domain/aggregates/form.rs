//! Form schema aggregate
//!
//! Rich aggregate root for a data-collection form: ordered field definitions
//! plus metadata, lifecycle status and audience type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::events::{DomainEvent, FormEvent};
use crate::domain::value_objects::{EntityId, FieldDefinition};

/// Lifecycle status. Transitions are free in every direction; only `Active`
/// forms accept public submissions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// Audience type. `Standard` forms require every submission to carry an
/// externally issued submitter id; `Anonymous` forms forbid collecting any
/// identifying submitter information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    #[default]
    Standard,
    Anonymous,
}

/// Form schema aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormSchema {
    id: EntityId,
    title: String,
    description: Option<String>,
    status: FormStatus,
    form_type: FormType,
    fields: Vec<FieldDefinition>,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl FormSchema {
    /// Create a new draft form (factory method)
    pub fn create(title: impl Into<String>, form_type: FormType, created_by: Option<String>) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut form = Self {
            id: id.clone(),
            title: title.into(),
            description: None,
            status: FormStatus::Draft,
            form_type,
            fields: vec![],
            created_by,
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        form.raise_event(DomainEvent::Form(FormEvent::Created {
            form_id: id.to_string(),
            created_at: now,
        }));

        form
    }

    // =========================================================================
    // Getters (immutable access to internal state)
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn status(&self) -> FormStatus { self.status }
    pub fn form_type(&self) -> FormType { self.form_type }
    pub fn fields(&self) -> &[FieldDefinition] { &self.fields }
    pub fn created_by(&self) -> Option<&str> { self.created_by.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn field_by_id(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Only active forms accept public submissions.
    pub fn accepts_public_submissions(&self) -> bool {
        self.status == FormStatus::Active
    }

    // =========================================================================
    // Business operations
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_form_type(&mut self, form_type: FormType) {
        self.form_type = form_type;
        self.touch();
    }

    /// Move to any lifecycle status. No ordering is enforced between draft,
    /// active and archived.
    pub fn set_status(&mut self, status: FormStatus) {
        if status == self.status {
            return;
        }
        let previous = self.status;
        self.status = status;
        self.touch();

        self.raise_event(DomainEvent::Form(FormEvent::StatusChanged {
            form_id: self.id.to_string(),
            previous,
            current: status,
        }));
    }

    /// Replace the full ordered field list (editor hand-off).
    pub fn set_fields(&mut self, fields: Vec<FieldDefinition>) {
        self.fields = fields;
        self.touch();
    }

    /// Save-time validation: a usable form needs a title and at least one
    /// field. This is not a structural invariant; drafts may be empty while
    /// being edited in memory.
    pub fn validate_for_save(&self) -> Result<(), SchemaValidationError> {
        if self.title.trim().is_empty() {
            return Err(SchemaValidationError::MissingTitle);
        }
        if self.fields.is_empty() {
            return Err(SchemaValidationError::NoFields);
        }
        Ok(())
    }

    // =========================================================================
    // Domain events
    // =========================================================================

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaValidationError {
    #[error("form title must not be empty")]
    MissingTitle,
    #[error("form must contain at least one field")]
    NoFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::FieldType;

    #[test]
    fn test_form_creation() {
        let form = FormSchema::create("Alumni Update", FormType::Standard, Some("admin-1".into()));
        assert_eq!(form.title(), "Alumni Update");
        assert_eq!(form.status(), FormStatus::Draft);
        assert_eq!(form.form_type(), FormType::Standard);
        assert!(form.fields().is_empty());
        assert!(!form.accepts_public_submissions());
    }

    #[test]
    fn test_created_event() {
        let mut form = FormSchema::create("Survey", FormType::Anonymous, None);
        let events = form.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DomainEvent::Form(FormEvent::Created { .. })));
    }

    #[test]
    fn test_status_transitions_are_free() {
        let mut form = FormSchema::create("Survey", FormType::Standard, None);
        form.take_events();

        form.set_status(FormStatus::Active);
        assert!(form.accepts_public_submissions());

        form.set_status(FormStatus::Archived);
        form.set_status(FormStatus::Draft);
        form.set_status(FormStatus::Active);

        let events = form.take_events();
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_same_status_raises_no_event() {
        let mut form = FormSchema::create("Survey", FormType::Standard, None);
        form.take_events();
        form.set_status(FormStatus::Draft);
        assert!(form.take_events().is_empty());
    }

    #[test]
    fn test_validate_for_save() {
        let mut form = FormSchema::create("", FormType::Standard, None);
        assert_eq!(form.validate_for_save(), Err(SchemaValidationError::MissingTitle));

        form.set_title("Alumni Update");
        assert_eq!(form.validate_for_save(), Err(SchemaValidationError::NoFields));

        form.set_fields(vec![FieldDefinition::new(FieldType::Text)]);
        assert!(form.validate_for_save().is_ok());
    }
}
