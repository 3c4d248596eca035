// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A value object rejected its input.
    #[error("validation error: {0}")]
    Validation(String),
    /// The store refused a write, e.g. an attempt to rewrite an audit entry.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The audit store failed or returned data it could not decode.
    #[error("persistence error: {0}")]
    Persistence(String),
}
