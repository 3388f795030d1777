//! Общие типы для всех агрегатов

pub mod aggregate_id;
pub mod error;

// Re-exports
pub use aggregate_id::AggregateId;
pub use error::{DomainError, DomainResult, FieldErrors};
