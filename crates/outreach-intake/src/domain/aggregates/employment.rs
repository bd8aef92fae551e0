//! Employment record aggregate
//!
//! A time-bounded position linked to a contact; target of
//! `employment.`-prefixed mapped fields (prefix already stripped by the time
//! a patch reaches this aggregate).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use outreach_forms::EntityId;

use crate::domain::value_objects::{value_to_bool, value_to_string, MappedFields};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmploymentRecord {
    id: EntityId,
    contact_id: EntityId,
    job_title: Option<String>,
    organization: Option<String>,
    is_current: bool,
    custom_fields: HashMap<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EmploymentRecord {
    /// Create a record for a contact from a submission's employment fields.
    /// A record created this way describes the submitter's present position,
    /// so it starts current unless the patch says otherwise.
    pub fn create_for_contact(contact_id: EntityId, fields: &MappedFields) -> Self {
        let now = Utc::now();
        let mut record = Self {
            id: EntityId::new(),
            contact_id,
            job_title: None,
            organization: None,
            is_current: true,
            custom_fields: HashMap::new(),
            created_at: now,
            updated_at: now,
        };
        record.apply_fields(fields);
        record
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn contact_id(&self) -> &EntityId { &self.contact_id }
    pub fn job_title(&self) -> Option<&str> { self.job_title.as_deref() }
    pub fn organization(&self) -> Option<&str> { self.organization.as_deref() }
    pub fn is_current(&self) -> bool { self.is_current }
    pub fn custom_fields(&self) -> &HashMap<String, Value> { &self.custom_fields }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Apply a mapped-field patch (keys without the `employment.` prefix).
    pub fn apply_mapped(&mut self, fields: &MappedFields) {
        if fields.is_empty() {
            return;
        }
        self.apply_fields(fields);
        self.updated_at = Utc::now();
    }

    fn apply_fields(&mut self, fields: &MappedFields) {
        for (key, value) in fields {
            match key.as_str() {
                "jobTitle" => self.job_title = Some(value_to_string(value)),
                "organization" => self.organization = Some(value_to_string(value)),
                "isCurrent" => self.is_current = value_to_bool(value),
                _ => {
                    self.custom_fields.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_to_current() {
        let record = EmploymentRecord::create_for_contact(
            EntityId::new(),
            &MappedFields::from([("jobTitle".to_string(), json!("Engineer"))]),
        );
        assert_eq!(record.job_title(), Some("Engineer"));
        assert!(record.is_current());
    }

    #[test]
    fn test_patch_can_clear_current_flag() {
        let mut record = EmploymentRecord::create_for_contact(EntityId::new(), &MappedFields::new());
        record.apply_mapped(&MappedFields::from([
            ("isCurrent".to_string(), json!(false)),
            ("organization".to_string(), json!("Acme Corp")),
        ]));
        assert!(!record.is_current());
        assert_eq!(record.organization(), Some("Acme Corp"));
    }

    #[test]
    fn test_unknown_keys_land_in_custom_fields() {
        let mut record = EmploymentRecord::create_for_contact(EntityId::new(), &MappedFields::new());
        record.apply_mapped(&MappedFields::from([("startYear".to_string(), json!(2021))]));
        assert_eq!(record.custom_fields()["startYear"], json!(2021));
    }
}
