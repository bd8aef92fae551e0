//! Mapping resolution pipeline
//!
//! Projects a submission's mapped fields onto the contact and employment
//! entities, resolving create-vs-update by the submitter's external id, then
//! advances the submission to processed. Contact and employment writes are
//! not transactional: a failed write surfaces to the caller and leaves the
//! submission status unchanged, while writes already committed stay put. A
//! retried run re-resolves by external id before creating anything, so it
//! never duplicates a contact.

use tracing::{debug, info, warn};

use outreach_forms::application::retry_read;
use outreach_forms::EntityId;

use crate::domain::aggregates::{Contact, EmploymentRecord, Submission};
use crate::domain::events::{ContactEvent, DomainEvent};
use crate::domain::value_objects::{split_by_target, MappedFields, SubmissionStatus};
use crate::ports::inbound::IntakeError;

use super::SubmissionService;

impl SubmissionService {
    pub(super) async fn process_submission(
        &self,
        submission_id: &EntityId,
    ) -> Result<Submission, IntakeError> {
        let mut submission = self.require_submission(submission_id).await?;

        // Archived is terminal for this pipeline; un-archive first.
        if submission.status() == SubmissionStatus::Archived {
            return Err(IntakeError::validation("archived submissions cannot be processed"));
        }

        let mut events: Vec<DomainEvent> = Vec::new();
        let mut applied_contact_id: Option<EntityId> = None;

        if !submission.mapped_fields().is_empty() {
            let (contact_fields, employment_fields) = split_by_target(submission.mapped_fields());

            match self.resolve_contact(&submission).await? {
                Some(mut contact) => {
                    if !contact_fields.is_empty() {
                        contact.apply_mapped(&contact_fields);
                        self.contacts
                            .update(&contact)
                            .await
                            .map_err(IntakeError::EntityWrite)?;
                    }
                    if !employment_fields.is_empty() {
                        let employment_id =
                            self.apply_employment(contact.id(), &employment_fields).await?;
                        events.push(DomainEvent::Contact(ContactEvent::EmploymentRecorded {
                            contact_id: contact.id().to_string(),
                            employment_id: employment_id.to_string(),
                        }));
                    }
                    events.extend(contact.take_events());
                    applied_contact_id = Some(contact.id().clone());
                }
                None => match submission.external_id() {
                    Some(external_id) => {
                        // First submission from this external id: seed a new
                        // profile, reachable by default.
                        let mut contact = Contact::create_from_mapped(
                            Some(external_id.to_string()),
                            &contact_fields,
                        );
                        self.contacts
                            .create(&contact)
                            .await
                            .map_err(IntakeError::EntityWrite)?;

                        if !employment_fields.is_empty() {
                            let record = EmploymentRecord::create_for_contact(
                                contact.id().clone(),
                                &employment_fields,
                            );
                            self.employment
                                .create(&record)
                                .await
                                .map_err(IntakeError::EntityWrite)?;
                            events.push(DomainEvent::Contact(ContactEvent::EmploymentRecorded {
                                contact_id: contact.id().to_string(),
                                employment_id: record.id().to_string(),
                            }));
                        }

                        events.extend(contact.take_events());
                        applied_contact_id = Some(contact.id().clone());
                    }
                    None => {
                        // Anonymous submissions structurally cannot be mapped
                        // to a profile; not an error.
                        debug!(submission_id = %submission.id(), "no submitter identity, mapped fields not applied");
                    }
                },
            }
        }

        // Status advances whether or not any entity write occurred; a write
        // failure above has already returned and left the status alone.
        submission.mark_processed(applied_contact_id.as_ref());
        self.submission_repo
            .update_status(submission.id(), SubmissionStatus::Processed)
            .await
            .map_err(IntakeError::Repository)?;

        events.extend(submission.take_events());
        self.event_publisher
            .publish(events)
            .await
            .map_err(IntakeError::Repository)?;

        info!(
            submission_id = %submission.id(),
            contact_id = applied_contact_id.as_ref().map(|c| c.to_string()).unwrap_or_default(),
            "submission processed"
        );
        Ok(submission)
    }

    /// Identity resolution: prefer the contact resolved at capture time, but
    /// fall back to a fresh external-id lookup so a stale reference or a
    /// retried run still finds the right profile.
    async fn resolve_contact(&self, submission: &Submission) -> Result<Option<Contact>, IntakeError> {
        if let Some(contact_id) = submission.resolved_contact_id() {
            match retry_read(|| self.contacts.find_by_id(contact_id))
                .await
                .map_err(IntakeError::IdentityResolution)?
            {
                Some(contact) => return Ok(Some(contact)),
                None => {
                    warn!(submission_id = %submission.id(), contact_id = %contact_id, "capture-time contact reference is stale");
                }
            }
        }
        match submission.external_id() {
            Some(external_id) => retry_read(|| self.contacts.find_by_external_id(external_id))
                .await
                .map_err(IntakeError::IdentityResolution),
            None => Ok(None),
        }
    }

    /// Employment fields update the contact's current record when one
    /// exists; otherwise they become a new record linked to the contact.
    async fn apply_employment(
        &self,
        contact_id: &EntityId,
        fields: &MappedFields,
    ) -> Result<EntityId, IntakeError> {
        match retry_read(|| self.employment.find_current(contact_id))
            .await
            .map_err(IntakeError::EntityWrite)?
        {
            Some(mut record) => {
                record.apply_mapped(fields);
                self.employment
                    .update(&record)
                    .await
                    .map_err(IntakeError::EntityWrite)?;
                Ok(record.id().clone())
            }
            None => {
                let record = EmploymentRecord::create_for_contact(contact_id.clone(), fields);
                self.employment
                    .create(&record)
                    .await
                    .map_err(IntakeError::EntityWrite)?;
                Ok(record.id().clone())
            }
        }
    }
}
