//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::{FormSummary, SaveFormCommand};
use crate::domain::aggregates::FormSchema;
use crate::domain::value_objects::EntityId;

/// Form management use cases
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Create or update a form. Save-time validation requires a non-empty
    /// title and at least one field; updates preserve id and created_at.
    async fn save_form(&self, command: SaveFormCommand) -> Result<FormSchema, UseCaseError>;

    /// Load a form by id. With `public_only` only active forms are visible.
    async fn load_form(&self, id: &EntityId, public_only: bool) -> Result<FormSchema, UseCaseError>;

    /// Delete a form (dependent submissions cascade on the collaborator).
    async fn delete_form(&self, id: &EntityId) -> Result<(), UseCaseError>;

    /// List all forms as flat summaries (admin surface).
    async fn list_forms(&self) -> Result<Vec<FormSummary>, UseCaseError>;
}

#[derive(Debug, Clone, Error)]
pub enum UseCaseError {
    /// User-correctable input problem; `fields` names the offending field
    /// ids when the problem is field-scoped.
    #[error("validation error: {message}")]
    Validation { message: String, fields: Vec<String> },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl UseCaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), fields: vec![] }
    }
}
