//! Outbound ports (Repository/Directory traits)
//!
//! Interfaces the contact database and submission store must implement. The
//! shared `RepositoryError` comes from the forms core so a single taxonomy
//! covers every collaborator boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use outreach_forms::EntityId;
pub use outreach_forms::RepositoryError;

use crate::domain::aggregates::{Contact, EmploymentRecord, Submission};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{SubmissionStatus, SubmissionType};

/// Filter for the review-queue listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionFilter {
    pub form_id: Option<EntityId>,
    pub status: Option<SubmissionStatus>,
    pub submission_type: Option<SubmissionType>,
}

/// Submission store port
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn save(&self, submission: &Submission) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>, RepositoryError>;

    async fn update_status(
        &self,
        id: &EntityId,
        status: SubmissionStatus,
    ) -> Result<(), RepositoryError>;

    async fn set_notes(&self, id: &EntityId, notes: &str) -> Result<(), RepositoryError>;

    async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError>;
}

/// Contact directory port (the alumni database)
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Read-only lookup by externally issued id.
    async fn find_by_external_id(&self, external_id: &str)
        -> Result<Option<Contact>, RepositoryError>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Contact>, RepositoryError>;

    async fn create(&self, contact: &Contact) -> Result<(), RepositoryError>;

    async fn update(&self, contact: &Contact) -> Result<(), RepositoryError>;
}

/// Employment record port
#[async_trait]
pub trait EmploymentDirectory: Send + Sync {
    /// The contact's current position, if any.
    async fn find_current(
        &self,
        contact_id: &EntityId,
    ) -> Result<Option<EmploymentRecord>, RepositoryError>;

    async fn create(&self, record: &EmploymentRecord) -> Result<(), RepositoryError>;

    async fn update(&self, record: &EmploymentRecord) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}
