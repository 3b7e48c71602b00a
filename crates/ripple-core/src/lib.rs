//! # Ripple Core
//!
//! The domain layer of the Ripple backend: entities, input validation,
//! the aggregate services, and the ports they talk through.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod input;
pub mod ports;
pub mod service;
pub mod validate;

pub use error::DomainError;
