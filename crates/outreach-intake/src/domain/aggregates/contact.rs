//! Contact aggregate
//!
//! The alumni profile entity that mapped fields create or update. Mapped
//! target paths use camelCase attribute keys; unrecognized keys land in the
//! custom-fields map rather than being dropped.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use outreach_forms::EntityId;

use crate::domain::events::{ContactEvent, DomainEvent};
use crate::domain::value_objects::{value_to_bool, value_to_string, MappedFields};

/// Contact aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    id: EntityId,
    /// Externally issued identifier used to resolve submitters.
    external_id: Option<String>,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    do_not_contact: bool,
    custom_fields: HashMap<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Contact {
    /// Create a contact seeded from a submission's non-employment mapped
    /// fields. Fresh contacts are reachable (`do_not_contact = false`).
    pub fn create_from_mapped(external_id: Option<String>, fields: &MappedFields) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut contact = Self {
            id: id.clone(),
            external_id: external_id.clone(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
            notes: None,
            do_not_contact: false,
            custom_fields: HashMap::new(),
            created_at: now,
            updated_at: now,
            events: vec![],
        };
        contact.apply_fields(fields);

        contact.raise_event(DomainEvent::Contact(ContactEvent::Created {
            contact_id: id.to_string(),
            external_id,
            created_at: now,
        }));

        contact
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn external_id(&self) -> Option<&str> { self.external_id.as_deref() }
    pub fn first_name(&self) -> &str { &self.first_name }
    pub fn last_name(&self) -> &str { &self.last_name }
    pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }
    pub fn notes(&self) -> Option<&str> { self.notes.as_deref() }
    pub fn do_not_contact(&self) -> bool { self.do_not_contact }
    pub fn custom_fields(&self) -> &HashMap<String, Value> { &self.custom_fields }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    // =========================================================================
    // Business operations
    // =========================================================================

    /// Apply a mapped-field patch from a processed submission.
    pub fn apply_mapped(&mut self, fields: &MappedFields) {
        if fields.is_empty() {
            return;
        }
        self.apply_fields(fields);
        self.touch();

        self.raise_event(DomainEvent::Contact(ContactEvent::Updated {
            contact_id: self.id.to_string(),
            updated_at: self.updated_at,
        }));
    }

    fn apply_fields(&mut self, fields: &MappedFields) {
        for (key, value) in fields {
            match key.as_str() {
                "firstName" => self.first_name = value_to_string(value),
                "lastName" => self.last_name = value_to_string(value),
                "email" => self.email = Some(value_to_string(value)),
                "phone" => self.phone = Some(value_to_string(value)),
                "notes" => self.notes = Some(value_to_string(value)),
                "doNotContact" => self.do_not_contact = value_to_bool(value),
                _ => {
                    self.custom_fields.insert(key.clone(), value.clone());
                }
            }
        }
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

    #[test]
    fn test_create_from_mapped_seeds_profile() {
        let fields = MappedFields::from([
            ("firstName".to_string(), json!("Jane")),
            ("email".to_string(), json!("jane@example.edu")),
        ]);
        let contact = Contact::create_from_mapped(Some("u123".into()), &fields);

        assert_eq!(contact.first_name(), "Jane");
        assert_eq!(contact.email(), Some("jane@example.edu"));
        assert_eq!(contact.external_id(), Some("u123"));
        assert!(!contact.do_not_contact());
    }

    #[test]
    fn test_created_event() {
        let mut contact = Contact::create_from_mapped(Some("u123".into()), &MappedFields::new());
        let events = contact.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DomainEvent::Contact(ContactEvent::Created { .. })));
    }

    #[test]
    fn test_apply_mapped_updates_known_attributes() {
        let mut contact = Contact::create_from_mapped(None, &MappedFields::new());
        contact.take_events();

        contact.apply_mapped(&MappedFields::from([
            ("lastName".to_string(), json!("Doe")),
            ("doNotContact".to_string(), json!(true)),
        ]));

        assert_eq!(contact.last_name(), "Doe");
        assert!(contact.do_not_contact());
        assert!(matches!(
            contact.take_events()[0],
            DomainEvent::Contact(ContactEvent::Updated { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_land_in_custom_fields() {
        let mut contact = Contact::create_from_mapped(None, &MappedFields::new());
        contact.apply_mapped(&MappedFields::from([
            ("graduationYear".to_string(), json!(2019)),
        ]));
        assert_eq!(contact.custom_fields()["graduationYear"], json!(2019));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut contact = Contact::create_from_mapped(None, &MappedFields::new());
        contact.take_events();
        contact.apply_mapped(&MappedFields::new());
        assert!(contact.take_events().is_empty());
    }
}
