// src/application/commands/audit/writer.rs
use super::{
    record::AuditRecord,
    sink::{AuditSink, FailurePolicy, FireAndForgetSink, TransactionalSink},
};
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::audit::{AuditLogRepository, AuditTransaction, NewAuditLog, Redacted, RedactionPolicy},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Redacts and persists audit entries.
///
/// Callers choose the coupling explicitly: [`AuditWriter::record_in`] shares
/// the caller's transaction and fails with it, [`AuditWriter::record`] is
/// best-effort and never fails.
pub struct AuditWriter {
    redaction: RedactionPolicy,
    clock: Arc<dyn Clock>,
    standalone: FireAndForgetSink,
}

impl AuditWriter {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        redaction: RedactionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            redaction,
            clock,
            standalone: FireAndForgetSink::new(repo),
        }
    }

    pub fn redaction(&self) -> &RedactionPolicy {
        &self.redaction
    }

    pub fn standalone_sink(&self) -> &FireAndForgetSink {
        &self.standalone
    }

    /// Best-effort write outside any transaction. Never fails the caller.
    pub async fn record(&self, record: AuditRecord) {
        let mut sink = self.standalone.clone();
        if let Err(err) = self.record_with(&mut sink, record).await {
            // Absorb policy already swallowed store errors; this only guards
            // against a future policy change.
            error!(error = %err, "audit write escaped the fire-and-forget sink");
        }
    }

    /// Write through the caller's transaction; the error, if any, must abort it.
    pub async fn record_in<T>(&self, tx: &mut T, record: AuditRecord) -> ApplicationResult<()>
    where
        T: AuditTransaction + ?Sized,
    {
        let mut sink = TransactionalSink::new(tx);
        self.record_with(&mut sink, record).await
    }

    pub async fn record_with<S>(&self, sink: &mut S, record: AuditRecord) -> ApplicationResult<()>
    where
        S: AuditSink + ?Sized,
    {
        let action = record.action.clone();
        let resource_type = record.resource_type.clone();
        let resource_id = record.resource_id.clone();

        let outcome = match self.prepare(record) {
            Ok(log) => sink.persist(log).await,
            Err(err) => Err(err),
        };

        let Err(err) = outcome else {
            debug!(%action, %resource_type, "audit entry written");
            return Ok(());
        };

        match sink.failure_policy() {
            FailurePolicy::Propagate => Err(err),
            FailurePolicy::Absorb => {
                error!(
                    %action,
                    %resource_type,
                    resource_id = resource_id.as_ref().map(|id| id.as_str()),
                    error = %err,
                    "failed to write audit log"
                );
                sink.write_dropped(&err);
                Ok(())
            }
        }
    }

    fn prepare(&self, record: AuditRecord) -> ApplicationResult<NewAuditLog> {
        if let Some(err) = record.snapshot_error() {
            return Err(ApplicationError::snapshot(err));
        }

        Ok(NewAuditLog {
            user_id: record.user_id,
            action: record.action,
            resource_type: record.resource_type,
            resource_id: record.resource_id,
            before: self.seal(record.before),
            after: self.seal(record.after),
            metadata: self.seal(record.metadata),
            created_at: self.clock.now(),
        })
    }

    fn seal(&self, snapshot: Option<Value>) -> Option<Redacted> {
        snapshot
            .filter(|value| !value.is_null())
            .map(|value| self.redaction.redact_snapshot(&value))
    }
}
