// src/infrastructure/repositories/memory_audit_log.rs
use crate::domain::{
    audit::{
        AuditLog, AuditLogFilter, AuditLogRepository, AuditTransaction, NewAuditLog, PageRequest,
    },
    errors::{DomainError, DomainResult},
    user::UserId,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tracing::debug;

#[derive(Default)]
struct Store {
    entries: Vec<AuditLog>,
    last_id: i64,
    user_names: HashMap<UserId, String>,
}

impl Store {
    fn append(&mut self, log: NewAuditLog) -> AuditLog {
        self.last_id += 1;
        let stored = log.into_stored(self.last_id, None);
        self.entries.push(stored.clone());
        self.with_actor_name(stored)
    }

    fn with_actor_name(&self, mut log: AuditLog) -> AuditLog {
        log.actor_name = log.user_id.and_then(|id| self.user_names.get(&id).cloned());
        log
    }
}

/// Process-local audit store used by the `memory` storage mode and in tests.
/// Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryAuditLogRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display name, joined onto entries at read time.
    pub fn register_user(&self, id: UserId, name: impl Into<String>) -> DomainResult<()> {
        let mut store = self.write()?;
        store.user_names.insert(id, name.into());
        Ok(())
    }

    /// Open a unit of work. Entries recorded through it become visible only on
    /// [`InMemoryTransaction::commit`]; dropping it discards them.
    pub fn begin(&self) -> InMemoryTransaction {
        InMemoryTransaction {
            repo: self.clone(),
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.read()?.entries.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|e| DomainError::Persistence(format!("failed to acquire lock: {e}")))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|e| DomainError::Persistence(format!("failed to acquire lock: {e}")))
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        Ok(self.write()?.append(log))
    }

    async fn search(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<AuditLog>, u64)> {
        let store = self.read()?;
        let mut matched: Vec<&AuditLog> =
            store.entries.iter().filter(|log| filter.matches(log)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = u64::try_from(matched.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(skip)
            .take(page.page_size() as usize)
            .map(|log| store.with_actor_name(log.clone()))
            .collect();
        Ok((items, total))
    }
}

/// Buffered writes against an [`InMemoryAuditLogRepository`].
pub struct InMemoryTransaction {
    repo: InMemoryAuditLogRepository,
    pending: Vec<NewAuditLog>,
}

impl InMemoryTransaction {
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn commit(self) -> DomainResult<()> {
        let mut store = self.repo.write()?;
        for log in self.pending {
            store.append(log);
        }
        Ok(())
    }

    pub fn rollback(self) {
        debug!(discarded = self.pending.len(), "in-memory transaction rolled back");
    }
}

#[async_trait]
impl AuditTransaction for InMemoryTransaction {
    async fn insert_audit_log(&mut self, log: NewAuditLog) -> DomainResult<()> {
        self.pending.push(log);
        Ok(())
    }
}
