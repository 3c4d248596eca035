// src/domain/audit/query.rs
use crate::domain::audit::{entity::AuditLog, value_objects::ResourceId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Conjunction of optional constraints over stored entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub user_id: Option<UserId>,
    /// Case-insensitive substring of the action.
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<ResourceId>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub created_until: Option<DateTime<Utc>>,
}

impl AuditLogFilter {
    pub fn matches(&self, log: &AuditLog) -> bool {
        let action = self.action.as_ref().map(|a| a.to_lowercase());

        self.user_id.is_none_or(|id| log.user_id == Some(id))
            && action.is_none_or(|a| log.action.to_lowercase().contains(&a))
            && self
                .resource_type
                .as_ref()
                .is_none_or(|rt| &log.resource_type == rt)
            && self
                .resource_id
                .as_ref()
                .is_none_or(|id| log.resource_id.as_ref() == Some(id))
            && self.created_from.is_none_or(|from| log.created_at >= from)
            && self.created_until.is_none_or(|until| log.created_at <= until)
    }
}

/// Offset pagination, normalised on construction: page >= 1 and
/// 1 <= page_size <= [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
