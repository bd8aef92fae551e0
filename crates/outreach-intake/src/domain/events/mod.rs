//! Intake domain events

use chrono::{DateTime, Utc};

use crate::domain::value_objects::SubmissionStatus;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Submission(SubmissionEvent),
    Contact(ContactEvent),
}

#[derive(Clone, Debug)]
pub enum SubmissionEvent {
    Captured {
        submission_id: String,
        form_id: Option<String>,
        captured_at: DateTime<Utc>,
    },
    StatusChanged {
        submission_id: String,
        previous: SubmissionStatus,
        current: SubmissionStatus,
    },
    Processed {
        submission_id: String,
        contact_id: Option<String>,
        processed_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub enum ContactEvent {
    Created {
        contact_id: String,
        external_id: Option<String>,
        created_at: DateTime<Utc>,
    },
    Updated {
        contact_id: String,
        updated_at: DateTime<Utc>,
    },
    EmploymentRecorded {
        contact_id: String,
        employment_id: String,
    },
}
