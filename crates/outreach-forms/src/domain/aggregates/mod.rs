//! Aggregates module

pub mod form;

pub use form::{FormSchema, FormStatus, FormType, SchemaValidationError};
