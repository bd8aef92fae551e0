//! Form domain events

use chrono::{DateTime, Utc};

use crate::domain::aggregates::FormStatus;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Form(FormEvent),
}

#[derive(Clone, Debug)]
pub enum FormEvent {
    Created {
        form_id: String,
        created_at: DateTime<Utc>,
    },
    StatusChanged {
        form_id: String,
        previous: FormStatus,
        current: FormStatus,
    },
    Deleted {
        form_id: String,
    },
}
