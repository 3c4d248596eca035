use crate::domain::audit::entity::{AuditLog, NewAuditLog};
use crate::domain::audit::query::{AuditLogFilter, PageRequest};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Append-only store of audit entries. There is no update or
/// delete.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog>;

    /// One page of matching entries, newest first, plus the total match count.
    async fn search(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<AuditLog>, u64)>;
}

/// Handle to a storage transaction opened by a business operation.
///
/// Rows written through it commit or roll back together with the caller's own
/// changes.
#[async_trait]
pub trait AuditTransaction: Send {
    async fn insert_audit_log(&mut self, log: NewAuditLog) -> DomainResult<()>;
}
