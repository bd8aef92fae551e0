//! In-memory repository implementations for testing and embedding.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::FormSchema;
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{EventPublisher, FormRepository, RepositoryError};

/// In-memory form repository backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: DashMap<String, FormSchema>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn find_by_id(
        &self,
        id: &EntityId,
        public_only: bool,
    ) -> Result<Option<FormSchema>, RepositoryError> {
        Ok(self
            .forms
            .get(id.as_str())
            .filter(|form| !public_only || form.value().accepts_public_submissions())
            .map(|form| form.value().clone()))
    }

    async fn save(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        self.forms.insert(form.id().to_string(), form.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        match self.forms.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list(&self) -> Result<Vec<FormSchema>, RepositoryError> {
        Ok(self.forms.iter().map(|entry| entry.value().clone()).collect())
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
