//! Submission capture and normalization
//!
//! Turns a raw answer payload into a pending submission: schema validation,
//! submitter-identity checks against the form's audience type, mapped-field
//! coercion and a read-only submitter lookup. Exactly one submission record
//! is created; downstream contact/employment writes are deferred to
//! processing.

use tracing::{debug, info};

use outreach_forms::application::retry_read;
use outreach_forms::{EntityId, FormRenderer, FormSchema, FormType};

use crate::application::dto::CaptureSubmissionCommand;
use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{coerce_answer, MappedFields, SubmitterIdentity};
use crate::ports::inbound::IntakeError;

use super::SubmissionService;

impl SubmissionService {
    pub(super) async fn capture_submission(
        &self,
        command: CaptureSubmissionCommand,
    ) -> Result<Submission, IntakeError> {
        let form_id = EntityId::from_string(&command.form_id);

        // Only active forms accept public submissions.
        let form = retry_read(|| self.form_repo.find_by_id(&form_id, true))
            .await
            .map_err(IntakeError::Repository)?
            .ok_or_else(|| IntakeError::NotFound(format!("form {form_id}")))?;

        let submitted_by =
            submitter_identity(form.form_type(), command.external_id, command.anonymous)?;

        let renderer = FormRenderer::new(&form);
        renderer.validate(&command.content).map_err(|e| IntakeError::Validation {
            message: "required fields are missing an answer".into(),
            fields: e.missing,
        })?;

        let mapped_fields = derive_mapped_fields(&form, &command.content);
        debug!(
            form_id = %form_id,
            mapped = mapped_fields.len(),
            "mapped fields derived from submission content"
        );

        // Read-only lookup; a submitter without an existing profile is fine
        // and gets resolved (or created) during processing.
        let resolved_contact_id = match submitted_by.external_id() {
            Some(external_id) => {
                retry_read(|| self.contacts.find_by_external_id(external_id))
                    .await
                    .map_err(IntakeError::IdentityResolution)?
                    .map(|contact| contact.id().clone())
            }
            None => None,
        };

        let mut submission = Submission::capture(
            form_id,
            command.content,
            submitted_by,
            mapped_fields,
            resolved_contact_id,
        );

        self.submission_repo
            .save(&submission)
            .await
            .map_err(IntakeError::Repository)?;

        self.event_publisher
            .publish(submission.take_events())
            .await
            .map_err(IntakeError::Repository)?;

        info!(
            submission_id = %submission.id(),
            form_id = %submission.form_id().map(|f| f.to_string()).unwrap_or_default(),
            resolved = submission.resolved_contact_id().is_some(),
            "submission captured"
        );
        Ok(submission)
    }
}

/// Check the supplied identity against the form's audience type: standard
/// forms demand exactly an external id, anonymous forms demand exactly the
/// anonymous flag. Both or neither is rejected.
fn submitter_identity(
    form_type: FormType,
    external_id: Option<String>,
    anonymous: bool,
) -> Result<SubmitterIdentity, IntakeError> {
    match form_type {
        FormType::Standard => match (external_id, anonymous) {
            (Some(external_id), false) => Ok(SubmitterIdentity::External { external_id }),
            (Some(_), true) => Err(IntakeError::validation(
                "submission supplied both an external id and the anonymous flag",
            )),
            (None, _) => Err(IntakeError::validation(
                "standard forms require a submitter external id",
            )),
        },
        FormType::Anonymous => match (external_id, anonymous) {
            (None, true) => Ok(SubmitterIdentity::Anonymous),
            (Some(_), _) => Err(IntakeError::validation(
                "anonymous forms must not collect identifying submitter information",
            )),
            (None, false) => Err(IntakeError::validation(
                "anonymous forms require the anonymous flag",
            )),
        },
    }
}

/// Walk the schema and project answered, mapped fields into the target-path
/// keyed map, coercing every value to string/number/bool/null.
fn derive_mapped_fields(
    form: &FormSchema,
    content: &std::collections::HashMap<String, serde_json::Value>,
) -> MappedFields {
    let mut mapped = MappedFields::new();
    for field in form.fields() {
        if field.is_display_element() {
            continue;
        }
        let target = match field.mapped_field.as_deref() {
            Some(target) if !target.is_empty() => target,
            _ => continue,
        };
        if let Some(answer) = content.get(&field.id) {
            if FormRenderer::is_answered(answer) {
                mapped.insert(target.to_string(), coerce_answer(answer));
            }
        }
    }
    mapped
}
