use crate::domain::audit::entity::AuditLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{pagination::Navigation, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub actor_name: Option<String>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub before: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub after: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(a: AuditLog) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id.map(Into::into),
            actor_name: a.actor_name,
            action: a.action,
            resource_type: a.resource_type,
            resource_id: a.resource_id.map(Into::into),
            before: a.before,
            after: a.after,
            metadata: a.metadata,
            created_at: a.created_at,
        }
    }
}

/// One line of the audit history table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogRowView {
    /// 1-based position across the whole result set, not just this page.
    pub number: u64,
    pub id: i64,
    pub date: String,
    pub time: String,
    /// Actor display name, or "Anonymous".
    pub user: String,
    /// Human-readable label derived from the action.
    pub action: String,
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageSummary {
    pub from: u64,
    pub to: u64,
    pub total: u64,
    pub text: String,
}

impl PageSummary {
    pub fn new(offset: u64, shown: u64, total: u64) -> Self {
        let (from, to) = if shown == 0 {
            (0, 0)
        } else {
            (offset + 1, offset + shown)
        };
        Self {
            from,
            to,
            total,
            text: format!("Showing {from} - {to} of {total}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogPageView {
    pub rows: Vec<AuditLogRowView>,
    pub summary: PageSummary,
    pub navigation: Navigation,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
