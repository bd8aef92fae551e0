//! Application layer
//!
//! Use case orchestration over the domain and the outbound ports.

pub mod dto;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::dto::{FormSummary, SaveFormCommand};
use crate::domain::aggregates::FormSchema;
use crate::domain::events::{DomainEvent, FormEvent};
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{FormUseCases, UseCaseError};
use crate::ports::outbound::{EventPublisher, FormRepository, RepositoryError};

/// Bounded attempts for idempotent boundary reads. Writes are never
/// auto-retried; a retried write after a partial failure could duplicate
/// entities.
pub const READ_RETRY_ATTEMPTS: u32 = 3;
const READ_RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

/// Run an idempotent read against a collaborator, retrying transient
/// failures with exponential backoff.
pub async fn retry_read<T, F, Fut>(op: F) -> Result<T, RepositoryError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RepositoryError>>,
{
    let mut delay = READ_RETRY_BASE_DELAY;
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < READ_RETRY_ATTEMPTS => {
                warn!(attempt, %err, "transient read failure, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Form application service
pub struct FormService {
    form_repo: Arc<dyn FormRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FormService {
    pub fn new(form_repo: Arc<dyn FormRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self { form_repo, event_publisher }
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn save_form(&self, command: SaveFormCommand) -> Result<FormSchema, UseCaseError> {
        let mut form = match &command.id {
            Some(id) => {
                let id = EntityId::from_string(id);
                self.form_repo
                    .find_by_id(&id, false)
                    .await
                    .map_err(|e| UseCaseError::Repository(e.to_string()))?
                    .ok_or_else(|| UseCaseError::NotFound(format!("form {id}")))?
            }
            None => FormSchema::create(command.title.clone(), command.form_type, command.created_by.clone()),
        };

        form.set_title(command.title);
        form.set_description(command.description);
        form.set_form_type(command.form_type);
        form.set_status(command.status);
        form.set_fields(command.fields);

        form.validate_for_save().map_err(|e| UseCaseError::validation(e.to_string()))?;

        self.form_repo
            .save(&form)
            .await
            .map_err(|e| UseCaseError::Repository(e.to_string()))?;
        info!(form_id = %form.id(), title = form.title(), "form saved");

        let events = form.take_events();
        self.event_publisher
            .publish(events)
            .await
            .map_err(|e| UseCaseError::Repository(e.to_string()))?;

        Ok(form)
    }

    async fn load_form(&self, id: &EntityId, public_only: bool) -> Result<FormSchema, UseCaseError> {
        debug!(form_id = %id, public_only, "loading form");
        retry_read(|| self.form_repo.find_by_id(id, public_only))
            .await
            .map_err(|e| UseCaseError::Repository(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(format!("form {id}")))
    }

    async fn delete_form(&self, id: &EntityId) -> Result<(), UseCaseError> {
        self.form_repo
            .delete(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => UseCaseError::NotFound(format!("form {id}")),
                other => UseCaseError::Repository(other.to_string()),
            })?;
        self.event_publisher
            .publish(vec![DomainEvent::Form(FormEvent::Deleted { form_id: id.to_string() })])
            .await
            .map_err(|e| UseCaseError::Repository(e.to_string()))?;
        info!(form_id = %id, "form deleted");
        Ok(())
    }

    async fn list_forms(&self) -> Result<Vec<FormSummary>, UseCaseError> {
        let forms = self
            .form_repo
            .list()
            .await
            .map_err(|e| UseCaseError::Repository(e.to_string()))?;
        Ok(forms.iter().map(FormSummary::from).collect())
    }
}
