//! Core domain primitives: errors and entity ids.

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::new_id;
