// tests/support/mocks/audit.rs
use chrono::{DateTime, Utc};
use ticket_audit::domain::audit::{NewAuditLog, ResourceId};

/// 固定時刻の監査エントリを生成する
pub fn entry(action: &str, resource_type: &str, resource_id: Option<&str>) -> NewAuditLog {
    entry_at(action, resource_type, resource_id, super::time::fixed_now())
}

pub fn entry_at(
    action: &str,
    resource_type: &str,
    resource_id: Option<&str>,
    created_at: DateTime<Utc>,
) -> NewAuditLog {
    NewAuditLog {
        user_id: None,
        action: action.into(),
        resource_type: resource_type.into(),
        resource_id: resource_id.map(ResourceId::from),
        before: None,
        after: None,
        metadata: None,
        created_at,
    }
}
