//! Aggregates module

pub mod submission;
pub mod contact;
pub mod employment;

pub use contact::Contact;
pub use employment::EmploymentRecord;
pub use submission::Submission;
