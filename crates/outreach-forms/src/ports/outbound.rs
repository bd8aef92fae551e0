//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must
//! implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::FormSchema;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::EntityId;

/// Form repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Find a form by id. With `public_only` the lookup additionally filters
    /// to active forms, so archived/draft forms read as absent to the public
    /// surface.
    async fn find_by_id(
        &self,
        id: &EntityId,
        public_only: bool,
    ) -> Result<Option<FormSchema>, RepositoryError>;

    /// Save a form (insert or update). Updates preserve id and created_at.
    async fn save(&self, form: &FormSchema) -> Result<(), RepositoryError>;

    /// Delete a form. Removal of dependent submissions cascades on the
    /// collaborator side.
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    /// List all forms (admin surface).
    async fn list(&self) -> Result<Vec<FormSchema>, RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// Transient infrastructure failure; reads may retry, writes never do.
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl RepositoryError {
    /// Only transient failures are worth retrying, and only for idempotent
    /// reads.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
