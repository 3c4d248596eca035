// tests/support/mocks/repos.rs
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use ticket_audit::domain::{
    audit::{
        AuditLog, AuditLogFilter, AuditLogRepository, AuditTransaction, NewAuditLog, PageRequest,
    },
    errors::{DomainError, DomainResult},
};

/* -------------------------------- CapturingAuditRepo -------------------------------- */

/// 挿入されたエントリを記録するリポジトリ
#[derive(Clone, Default)]
pub struct CapturingAuditRepo {
    pub inserted: Arc<Mutex<Vec<NewAuditLog>>>,
}

impl CapturingAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<NewAuditLog> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for CapturingAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(log.clone());
        let id = i64::try_from(inserted.len()).unwrap();
        Ok(log.into_stored(id, None))
    }

    async fn search(
        &self,
        _filter: &AuditLogFilter,
        _page: PageRequest,
    ) -> DomainResult<(Vec<AuditLog>, u64)> {
        Ok((Vec::new(), 0))
    }
}

/* -------------------------------- FailingAuditRepo -------------------------------- */

/// 常に永続化エラーを返すリポジトリ（ストア停止の再現）
#[derive(Clone, Debug, Default)]
pub struct FailingAuditRepo;

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<AuditLog> {
        Err(DomainError::Persistence("store unavailable".into()))
    }

    async fn search(
        &self,
        _filter: &AuditLogFilter,
        _page: PageRequest,
    ) -> DomainResult<(Vec<AuditLog>, u64)> {
        Err(DomainError::Persistence("store unavailable".into()))
    }
}

/* -------------------------------- FailingTransaction -------------------------------- */

/// 挿入が必ず失敗するトランザクション
#[derive(Debug, Default)]
pub struct FailingTransaction {
    pub attempts: usize,
}

#[async_trait]
impl AuditTransaction for FailingTransaction {
    async fn insert_audit_log(&mut self, _log: NewAuditLog) -> DomainResult<()> {
        self.attempts += 1;
        Err(DomainError::Persistence("insert rejected".into()))
    }
}
