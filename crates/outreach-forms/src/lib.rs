//! Outreach Forms Platform (Forms Core)
//!
//! Dynamic form schema engine for the alumni outreach platform, following
//! Domain-Driven Design (DDD) and hexagonal architecture principles.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Form schema aggregate, field value objects, domain events
//! - **Application Layer**: Use case orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: Concrete implementations
//!
//! ## Key Components
//!
//! - **Field Type Registry**: closed set of field kinds with table-driven
//!   structural constraints (display-only, options, placeholder, defaults)
//! - **Schema Editor**: stateful add/update/remove/duplicate/reorder over a
//!   form schema with an active-field pointer
//! - **Renderer/Validator**: per-field input affordances, answered checks and
//!   the required-field submission gate

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::registry::{FieldType, FieldTypeSpec};
pub use domain::value_objects::{EntityId, FieldDefinition, MonthYear};
pub use domain::aggregates::{FormSchema, FormStatus, FormType, SchemaValidationError};
pub use domain::events::{DomainEvent, FormEvent};
pub use domain::services::{
    Affordance, FieldView, FormRenderer, MoveDirection, RequiredFieldsError, SchemaEditor,
};
pub use application::FormService;
pub use ports::inbound::{FormUseCases, UseCaseError};
pub use ports::outbound::{EventPublisher, FormRepository, RepositoryError};
