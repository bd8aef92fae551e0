//! Ports layer (hexagonal architecture)

pub mod inbound;
pub mod outbound;
