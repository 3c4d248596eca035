// src/domain/audit/mod.rs
pub mod diff;
pub mod entity;
pub mod query;
pub mod redaction;
pub mod repository;
pub mod value_objects;

#[cfg(test)]
mod redaction_tests;

pub use diff::{DiffOptions, FieldChange, collect_changes, format_changes};
pub use entity::{AuditLog, NewAuditLog};
pub use query::{AuditLogFilter, PageRequest};
pub use redaction::{Redacted, RedactionPolicy};
pub use repository::{AuditLogRepository, AuditTransaction};
pub use value_objects::ResourceId;
