//! Application layer
//!
//! The submission service orchestrates capture, the mapping resolution
//! pipeline and the review workflow over the outbound ports. Capture and
//! processing are deliberately decoupled: capture never writes to the
//! contact database, so a submission can be reviewed before it affects live
//! records.

pub mod dto;

mod capture;
mod processing;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use outreach_forms::{EntityId, FormRepository};

use crate::application::dto::{CaptureSubmissionCommand, RecordLegacyCommand};
use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{SubmissionStatus, SubmissionType};
use crate::ports::inbound::{IntakeError, SubmissionUseCases};
use crate::ports::outbound::{
    ContactDirectory, EmploymentDirectory, EventPublisher, RepositoryError, SubmissionFilter,
    SubmissionRepository,
};

/// Submission application service
pub struct SubmissionService {
    form_repo: Arc<dyn FormRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
    contacts: Arc<dyn ContactDirectory>,
    employment: Arc<dyn EmploymentDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmissionService {
    pub fn new(
        form_repo: Arc<dyn FormRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        contacts: Arc<dyn ContactDirectory>,
        employment: Arc<dyn EmploymentDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self { form_repo, submission_repo, contacts, employment, event_publisher }
    }

    async fn require_submission(&self, id: &EntityId) -> Result<Submission, IntakeError> {
        outreach_forms::application::retry_read(|| self.submission_repo.find_by_id(id))
            .await
            .map_err(IntakeError::Repository)?
            .ok_or_else(|| IntakeError::NotFound(format!("submission {id}")))
    }

    fn map_status_write(id: &EntityId, err: RepositoryError) -> IntakeError {
        match err {
            RepositoryError::NotFound => IntakeError::NotFound(format!("submission {id}")),
            other => IntakeError::Repository(other),
        }
    }
}

#[async_trait]
impl SubmissionUseCases for SubmissionService {
    async fn capture(&self, command: CaptureSubmissionCommand) -> Result<Submission, IntakeError> {
        self.capture_submission(command).await
    }

    async fn record_legacy(&self, command: RecordLegacyCommand) -> Result<Submission, IntakeError> {
        if command.submission_type == SubmissionType::FormResponse {
            return Err(IntakeError::validation(
                "form responses must be captured against their form schema",
            ));
        }
        let mut submission =
            Submission::legacy(command.submission_type, command.content, command.submitted_by);
        self.submission_repo
            .save(&submission)
            .await
            .map_err(IntakeError::Repository)?;
        self.event_publisher
            .publish(submission.take_events())
            .await
            .map_err(IntakeError::Repository)?;
        info!(submission_id = %submission.id(), kind = ?submission.submission_type(), "legacy intake recorded");
        Ok(submission)
    }

    async fn process(&self, submission_id: &EntityId) -> Result<Submission, IntakeError> {
        self.process_submission(submission_id).await
    }

    async fn set_status(
        &self,
        submission_id: &EntityId,
        status: SubmissionStatus,
    ) -> Result<(), IntakeError> {
        self.submission_repo
            .update_status(submission_id, status)
            .await
            .map_err(|e| Self::map_status_write(submission_id, e))?;
        info!(submission_id = %submission_id, ?status, "submission status set");
        Ok(())
    }

    async fn set_notes(&self, submission_id: &EntityId, notes: &str) -> Result<(), IntakeError> {
        self.submission_repo
            .set_notes(submission_id, notes)
            .await
            .map_err(|e| Self::map_status_write(submission_id, e))
    }

    async fn list(&self, filter: SubmissionFilter) -> Result<Vec<Submission>, IntakeError> {
        self.submission_repo
            .list(&filter)
            .await
            .map_err(IntakeError::Repository)
    }
}
