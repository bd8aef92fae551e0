//! In-memory adapter implementations for testing and embedding.
//!
//! The directories count their writes so tests can assert that capture and
//! anonymous processing never touch the contact database.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use outreach_forms::EntityId;

use crate::domain::aggregates::{Contact, EmploymentRecord, Submission};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::SubmissionStatus;
use crate::ports::outbound::{
    ContactDirectory, EmploymentDirectory, EventPublisher, RepositoryError, SubmissionFilter,
    SubmissionRepository,
};

/// In-memory submission store
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: DashMap<String, Submission>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn save(&self, submission: &Submission) -> Result<(), RepositoryError> {
        self.submissions.insert(submission.id().to_string(), submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>, RepositoryError> {
        Ok(self.submissions.get(id.as_str()).map(|s| s.value().clone()))
    }

    async fn update_status(
        &self,
        id: &EntityId,
        status: SubmissionStatus,
    ) -> Result<(), RepositoryError> {
        match self.submissions.get_mut(id.as_str()) {
            Some(mut entry) => {
                entry.value_mut().set_status(status);
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn set_notes(&self, id: &EntityId, notes: &str) -> Result<(), RepositoryError> {
        match self.submissions.get_mut(id.as_str()) {
            Some(mut entry) => {
                entry.value_mut().set_notes(notes);
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError> {
        Ok(self
            .submissions
            .iter()
            .filter(|entry| {
                let s = entry.value();
                filter.form_id.as_ref().map_or(true, |f| s.form_id() == Some(f))
                    && filter.status.map_or(true, |st| s.status() == st)
                    && filter.submission_type.map_or(true, |t| s.submission_type() == t)
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}

/// In-memory contact directory
#[derive(Default)]
pub struct InMemoryContactDirectory {
    contacts: DashMap<String, Contact>,
    writes: AtomicUsize,
}

impl InMemoryContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Number of create/update calls observed.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactDirectory for InMemoryContactDirectory {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Contact>, RepositoryError> {
        Ok(self
            .contacts
            .iter()
            .find(|entry| entry.value().external_id() == Some(external_id))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Contact>, RepositoryError> {
        Ok(self.contacts.get(id.as_str()).map(|c| c.value().clone()))
    }

    async fn create(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.contacts.contains_key(contact.id().as_str()) {
            return Err(RepositoryError::DuplicateKey(contact.id().to_string()));
        }
        self.contacts.insert(contact.id().to_string(), contact.clone());
        Ok(())
    }

    async fn update(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if !self.contacts.contains_key(contact.id().as_str()) {
            return Err(RepositoryError::NotFound);
        }
        self.contacts.insert(contact.id().to_string(), contact.clone());
        Ok(())
    }
}

/// In-memory employment record directory
#[derive(Default)]
pub struct InMemoryEmploymentDirectory {
    records: DashMap<String, EmploymentRecord>,
    writes: AtomicUsize,
}

impl InMemoryEmploymentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of create/update calls observed.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmploymentDirectory for InMemoryEmploymentDirectory {
    async fn find_current(
        &self,
        contact_id: &EntityId,
    ) -> Result<Option<EmploymentRecord>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.value().contact_id() == contact_id && entry.value().is_current())
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, record: &EmploymentRecord) -> Result<(), RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records.insert(record.id().to_string(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &EmploymentRecord) -> Result<(), RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if !self.records.contains_key(record.id().as_str()) {
            return Err(RepositoryError::NotFound);
        }
        self.records.insert(record.id().to_string(), record.clone());
        Ok(())
    }
}

/// No-op event publisher for testing
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::domain::value_objects::{MappedFields, SubmissionType, SubmitterIdentity};

    use super::*;

    fn pending_submission() -> Submission {
        Submission::capture(
            EntityId::new(),
            HashMap::from([("f1".to_string(), json!("x"))]),
            SubmitterIdentity::External { external_id: "u1".into() },
            MappedFields::new(),
            None,
        )
    }

    #[tokio::test]
    async fn test_status_and_notes_round_trip() {
        let repo = InMemorySubmissionRepository::new();
        let submission = pending_submission();
        repo.save(&submission).await.unwrap();

        repo.update_status(submission.id(), SubmissionStatus::Reviewed).await.unwrap();
        repo.set_notes(submission.id(), "looks good").await.unwrap();

        let stored = repo.find_by_id(submission.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SubmissionStatus::Reviewed);
        assert_eq!(stored.notes(), "looks good");
    }

    #[tokio::test]
    async fn test_update_status_for_missing_submission() {
        let repo = InMemorySubmissionRepository::new();
        let err = repo
            .update_status(&EntityId::new(), SubmissionStatus::Archived)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let repo = InMemorySubmissionRepository::new();
        repo.save(&pending_submission()).await.unwrap();
        repo.save(&Submission::legacy(
            SubmissionType::Volunteer,
            HashMap::new(),
            SubmitterIdentity::Named { name: "Jo".into(), email: "jo@example.edu".into() },
        ))
        .await
        .unwrap();

        let volunteers = repo
            .list(&SubmissionFilter {
                submission_type: Some(SubmissionType::Volunteer),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(volunteers.len(), 1);

        let all = repo.list(&SubmissionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_contact_directory_lookup_by_external_id() {
        let directory = InMemoryContactDirectory::new();
        let contact = Contact::create_from_mapped(Some("u42".into()), &MappedFields::new());
        directory.create(&contact).await.unwrap();

        let found = directory.find_by_external_id("u42").await.unwrap();
        assert_eq!(found.unwrap().id(), contact.id());
        assert!(directory.find_by_external_id("nobody").await.unwrap().is_none());
        assert_eq!(directory.write_count(), 1);
    }

    #[tokio::test]
    async fn test_find_current_ignores_past_positions() {
        let directory = InMemoryEmploymentDirectory::new();
        let contact_id = EntityId::new();

        let past = EmploymentRecord::create_for_contact(
            contact_id.clone(),
            &MappedFields::from([("isCurrent".to_string(), json!(false))]),
        );
        directory.create(&past).await.unwrap();
        assert!(directory.find_current(&contact_id).await.unwrap().is_none());

        let current = EmploymentRecord::create_for_contact(contact_id.clone(), &MappedFields::new());
        directory.create(&current).await.unwrap();
        let found = directory.find_current(&contact_id).await.unwrap().unwrap();
        assert_eq!(found.id(), current.id());
    }
}
