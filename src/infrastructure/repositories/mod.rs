// src/infrastructure/repositories/mod.rs
mod error;
mod memory_audit_log;
mod postgres_audit_log;

pub use error::map_sqlx;
pub use memory_audit_log::{InMemoryAuditLogRepository, InMemoryTransaction};
pub use postgres_audit_log::PostgresAuditLogRepository;
