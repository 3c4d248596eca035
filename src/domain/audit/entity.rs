// src/domain/audit/entity.rs
use crate::domain::audit::{redaction::Redacted, value_objects::ResourceId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A stored audit entry. Entries are append-only and never change after
/// insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: i64,
    pub user_id: Option<UserId>,
    /// Display name of the actor, joined from the user store when read.
    pub actor_name: Option<String>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<ResourceId>,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Write model for a single audit entry. Snapshots are already redacted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    pub user_id: Option<UserId>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<ResourceId>,
    pub before: Option<Redacted>,
    pub after: Option<Redacted>,
    pub metadata: Option<Redacted>,
    pub created_at: DateTime<Utc>,
}

impl NewAuditLog {
    /// Materialise the stored form once the store has assigned an id.
    pub fn into_stored(self, id: i64, actor_name: Option<String>) -> AuditLog {
        AuditLog {
            id,
            user_id: self.user_id,
            actor_name,
            action: self.action,
            resource_type: self.resource_type,
            resource_id: self.resource_id,
            before: self.before.map(Redacted::into_value),
            after: self.after.map(Redacted::into_value),
            metadata: self.metadata.map(Redacted::into_value),
            created_at: self.created_at,
        }
    }
}
