//! Domain services
//!
//! Stateless/session-scoped logic that does not belong to a single aggregate
//! method: the schema editor engine and the renderer/validator.

pub mod editor;
pub mod renderer;

pub use editor::{MoveDirection, SchemaEditor};
pub use renderer::{Affordance, FieldView, FormRenderer, RequiredFieldsError};
