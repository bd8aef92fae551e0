//! Submission aggregate
//!
//! A captured response: raw content keyed by field id, submitter identity,
//! the derived mapped-field map, and the review status. Content and mapped
//! fields are immutable after capture; only status and notes mutate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use outreach_forms::EntityId;

use crate::domain::events::{DomainEvent, SubmissionEvent};
use crate::domain::value_objects::{MappedFields, SubmissionStatus, SubmissionType, SubmitterIdentity};

/// Submission aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    id: EntityId,
    /// Absent for legacy/ad-hoc intake types that never had an owning form.
    form_id: Option<EntityId>,
    submission_type: SubmissionType,
    content: HashMap<String, Value>,
    submitted_by: SubmitterIdentity,
    /// Contact resolved at capture time for standard-form submitters whose
    /// external id was already on file.
    resolved_contact_id: Option<EntityId>,
    mapped_fields: MappedFields,
    status: SubmissionStatus,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Submission {
    /// Capture a form response (factory method). Starts pending with empty
    /// notes.
    pub fn capture(
        form_id: EntityId,
        content: HashMap<String, Value>,
        submitted_by: SubmitterIdentity,
        mapped_fields: MappedFields,
        resolved_contact_id: Option<EntityId>,
    ) -> Self {
        Self::new(
            Some(form_id),
            SubmissionType::FormResponse,
            content,
            submitted_by,
            mapped_fields,
            resolved_contact_id,
        )
    }

    /// Record a legacy/ad-hoc intake entry (RSVP, volunteer interest, ...)
    /// with fixed semantic content keys and no owning form.
    pub fn legacy(
        submission_type: SubmissionType,
        content: HashMap<String, Value>,
        submitted_by: SubmitterIdentity,
    ) -> Self {
        Self::new(None, submission_type, content, submitted_by, MappedFields::new(), None)
    }

    fn new(
        form_id: Option<EntityId>,
        submission_type: SubmissionType,
        content: HashMap<String, Value>,
        submitted_by: SubmitterIdentity,
        mapped_fields: MappedFields,
        resolved_contact_id: Option<EntityId>,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut submission = Self {
            id: id.clone(),
            form_id: form_id.clone(),
            submission_type,
            content,
            submitted_by,
            resolved_contact_id,
            mapped_fields,
            status: SubmissionStatus::Pending,
            notes: String::new(),
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        submission.raise_event(DomainEvent::Submission(SubmissionEvent::Captured {
            submission_id: id.to_string(),
            form_id: form_id.map(|f| f.to_string()),
            captured_at: now,
        }));

        submission
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn form_id(&self) -> Option<&EntityId> { self.form_id.as_ref() }
    pub fn submission_type(&self) -> SubmissionType { self.submission_type }
    pub fn content(&self) -> &HashMap<String, Value> { &self.content }
    pub fn submitted_by(&self) -> &SubmitterIdentity { &self.submitted_by }
    pub fn resolved_contact_id(&self) -> Option<&EntityId> { self.resolved_contact_id.as_ref() }
    pub fn mapped_fields(&self) -> &MappedFields { &self.mapped_fields }
    pub fn status(&self) -> SubmissionStatus { self.status }
    pub fn notes(&self) -> &str { &self.notes }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn external_id(&self) -> Option<&str> {
        self.submitted_by.external_id()
    }

    // =========================================================================
    // Review workflow
    // =========================================================================

    /// Set any status from any other; the review workflow imposes no hard
    /// transition guards.
    pub fn set_status(&mut self, status: SubmissionStatus) {
        if status == self.status {
            return;
        }
        let previous = self.status;
        self.status = status;
        self.touch();

        self.raise_event(DomainEvent::Submission(SubmissionEvent::StatusChanged {
            submission_id: self.id.to_string(),
            previous,
            current: status,
        }));
    }

    /// Advance to processed after the mapping pipeline ran (whether or not
    /// any entity write occurred).
    pub fn mark_processed(&mut self, contact_id: Option<&EntityId>) {
        self.status = SubmissionStatus::Processed;
        self.touch();

        self.raise_event(DomainEvent::Submission(SubmissionEvent::Processed {
            submission_id: self.id.to_string(),
            contact_id: contact_id.map(|c| c.to_string()),
            processed_at: Utc::now(),
        }));
    }

    /// Free-text annotation, settable at any status.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.touch();
    }

    // =========================================================================
    // Domain events
    // =========================================================================

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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn captured() -> Submission {
        Submission::capture(
            EntityId::new(),
            HashMap::from([("f1".to_string(), json!("Jane"))]),
            SubmitterIdentity::External { external_id: "u123".into() },
            MappedFields::from([("firstName".to_string(), json!("Jane"))]),
            None,
        )
    }

    #[test]
    fn test_capture_starts_pending_with_empty_notes() {
        let submission = captured();
        assert_eq!(submission.status(), SubmissionStatus::Pending);
        assert_eq!(submission.notes(), "");
        assert_eq!(submission.submission_type(), SubmissionType::FormResponse);
        assert_eq!(submission.external_id(), Some("u123"));
    }

    #[test]
    fn test_captured_event() {
        let mut submission = captured();
        let events = submission.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DomainEvent::Submission(SubmissionEvent::Captured { .. })));
    }

    #[test]
    fn test_status_transitions_are_unguarded() {
        let mut submission = captured();
        submission.take_events();

        submission.set_status(SubmissionStatus::Reviewed);
        submission.set_status(SubmissionStatus::Processed);
        // reverting to pending is allowed
        submission.set_status(SubmissionStatus::Pending);
        submission.set_status(SubmissionStatus::Archived);
        // un-archive is an explicit status write like any other
        submission.set_status(SubmissionStatus::Pending);

        assert_eq!(submission.take_events().len(), 5);
    }

    #[test]
    fn test_notes_settable_at_any_status() {
        let mut submission = captured();
        submission.set_status(SubmissionStatus::Archived);
        submission.set_notes("needs follow-up call");
        assert_eq!(submission.notes(), "needs follow-up call");
    }

    #[test]
    fn test_legacy_submission_has_no_form() {
        let submission = Submission::legacy(
            SubmissionType::EventRsvp,
            HashMap::from([("attending".to_string(), json!(true))]),
            SubmitterIdentity::Named { name: "Jane Doe".into(), email: "jane@example.edu".into() },
        );
        assert!(submission.form_id().is_none());
        assert!(submission.mapped_fields().is_empty());
    }
}
