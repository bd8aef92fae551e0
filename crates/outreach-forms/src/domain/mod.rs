//! Domain layer
//!
//! Rich aggregates, value objects, domain services and events.

pub mod registry;
pub mod value_objects;
pub mod aggregates;
pub mod events;
pub mod services;

pub use events::DomainEvent;
