// src/application/commands/audit/mod.rs
mod record;
mod sink;
mod writer;

pub use record::AuditRecord;
pub use sink::{AuditSink, FailurePolicy, FireAndForgetSink, TransactionalSink};
pub use writer::AuditWriter;
