//! Outreach Intake Platform (Submissions & Mapping)
//!
//! Submission capture, review workflow and the mapping resolution pipeline
//! that reconciles form responses against the alumni contact database.
//! Follows the same Domain-Driven Design and hexagonal architecture as the
//! forms core.
//!
//! ## Key Components
//!
//! - **Submission Capture**: validates a raw answer payload against its form
//!   schema, attaches the submitter identity and derives the mapped-field map
//! - **Mapping Resolution Pipeline**: projects a pending submission's mapped
//!   fields onto contact and employment records, resolving create-vs-update
//!   by the submitter's external id
//! - **Review Workflow**: status and notes mutation over captured
//!   submissions; no hard transition guards

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{Contact, EmploymentRecord, Submission};
pub use domain::events::{ContactEvent, DomainEvent, SubmissionEvent};
pub use domain::value_objects::{
    MappedFields, SubmissionStatus, SubmissionType, SubmitterIdentity, EMPLOYMENT_PREFIX,
};
pub use application::SubmissionService;
pub use application::dto::CaptureSubmissionCommand;
pub use ports::inbound::{IntakeError, SubmissionUseCases};
pub use ports::outbound::{
    ContactDirectory, EmploymentDirectory, EventPublisher, SubmissionFilter, SubmissionRepository,
};
