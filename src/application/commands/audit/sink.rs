// src/application/commands/audit/sink.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::audit::{AuditLogRepository, AuditTransaction, NewAuditLog},
};
use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// What the writer does when a sink fails to persist an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error so the caller aborts its transaction.
    Propagate,
    /// Log the error and report success to the caller.
    Absorb,
}

/// Destination for prepared audit entries.
#[async_trait]
pub trait AuditSink: Send {
    fn failure_policy(&self) -> FailurePolicy;

    async fn persist(&mut self, log: NewAuditLog) -> ApplicationResult<()>;

    /// Hook invoked after a failure was absorbed.
    fn write_dropped(&self, _err: &ApplicationError) {}
}

/// Writes through the caller's open transaction. All or nothing: the entry
/// commits with the business mutation, and a failed insert fails the caller.
pub struct TransactionalSink<'t, T: AuditTransaction + ?Sized> {
    tx: &'t mut T,
}

impl<'t, T: AuditTransaction + ?Sized> TransactionalSink<'t, T> {
    pub fn new(tx: &'t mut T) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl<'t, T: AuditTransaction + ?Sized> AuditSink for TransactionalSink<'t, T> {
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Propagate
    }

    async fn persist(&mut self, log: NewAuditLog) -> ApplicationResult<()> {
        self.tx
            .insert_audit_log(log)
            .await
            .map_err(ApplicationError::from)
    }
}

/// Commits each entry on its own, outside any caller transaction. Failures
/// are logged and counted but never reach the caller, so an entry can be lost
/// while the audited operation succeeds.
#[derive(Clone)]
pub struct FireAndForgetSink {
    repo: Arc<dyn AuditLogRepository>,
    dropped: Arc<AtomicU64>,
}

impl FireAndForgetSink {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self {
            repo,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of entries lost so far. Clones share the counter.
    pub fn dropped_writes(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AuditSink for FireAndForgetSink {
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Absorb
    }

    async fn persist(&mut self, log: NewAuditLog) -> ApplicationResult<()> {
        self.repo.insert(log).await?;
        Ok(())
    }

    fn write_dropped(&self, _err: &ApplicationError) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }
}
