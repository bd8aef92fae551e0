//! Inbound ports (Use case traits)

use async_trait::async_trait;
use thiserror::Error;

use outreach_forms::EntityId;

use crate::application::dto::{CaptureSubmissionCommand, RecordLegacyCommand};
use crate::domain::aggregates::Submission;
use crate::domain::value_objects::SubmissionStatus;
use crate::ports::outbound::{RepositoryError, SubmissionFilter};

/// Submission intake and review use cases
#[async_trait]
pub trait SubmissionUseCases: Send + Sync {
    /// Capture a raw form response: validate against the schema, derive the
    /// mapped-field map, resolve the submitter if possible and persist a
    /// pending submission. No contact or employment writes happen here.
    async fn capture(&self, command: CaptureSubmissionCommand) -> Result<Submission, IntakeError>;

    /// Record a legacy/ad-hoc intake entry (RSVP, volunteer interest, ...)
    /// that has no owning form schema and no mapped fields.
    async fn record_legacy(&self, command: RecordLegacyCommand) -> Result<Submission, IntakeError>;

    /// Run the mapping resolution pipeline and advance to processed.
    /// Idempotent with respect to contact creation: a retry re-resolves by
    /// external id before creating anything.
    async fn process(&self, submission_id: &EntityId) -> Result<Submission, IntakeError>;

    /// Pure status write; any status is reachable from any other.
    async fn set_status(
        &self,
        submission_id: &EntityId,
        status: SubmissionStatus,
    ) -> Result<(), IntakeError>;

    /// Pure annotation write, allowed at any status.
    async fn set_notes(&self, submission_id: &EntityId, notes: &str) -> Result<(), IntakeError>;

    /// Review-queue listing.
    async fn list(&self, filter: SubmissionFilter) -> Result<Vec<Submission>, IntakeError>;
}

/// Intake failure, attributable to the stage that produced it so callers can
/// decide between retrying `process` and manual correction.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// User-correctable input problem; `fields` carries offending field ids.
    #[error("validation error: {message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("not found: {0}")]
    NotFound(String),

    /// Submitter lookup against the contact directory failed.
    #[error("identity resolution failed: {0}")]
    IdentityResolution(#[source] RepositoryError),

    /// A contact/employment write failed. The submission status is left
    /// unchanged; partial writes already committed are not rolled back.
    #[error("entity write failed: {0}")]
    EntityWrite(#[source] RepositoryError),

    #[error("repository error: {0}")]
    Repository(#[source] RepositoryError),
}

impl IntakeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), fields: vec![] }
    }
}
