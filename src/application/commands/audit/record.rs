// src/application/commands/audit/record.rs
use crate::domain::{audit::ResourceId, user::UserId};
use serde::Serialize;
use serde_json::Value;

/// A tracked action as reported by a business operation, before redaction.
///
/// `action` and `resource_type` are required; everything else is optional.
///
/// ```ignore
/// let record = AuditRecord::new("ticket.close", "Ticket")
///     .actor(user.id)
///     .resource(ticket.id)
///     .before_snapshot(&previous)
///     .after_snapshot(&ticket);
/// ```
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub user_id: Option<UserId>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<ResourceId>,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub metadata: Option<Value>,
    snapshot_error: Option<String>,
}

impl AuditRecord {
    pub fn new(action: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            user_id: None,
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: None,
            before: None,
            after: None,
            metadata: None,
            snapshot_error: None,
        }
    }

    #[must_use]
    pub fn actor(mut self, user_id: impl Into<Option<UserId>>) -> Self {
        self.user_id = user_id.into();
        self
    }

    #[must_use]
    pub fn resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    #[must_use]
    pub fn maybe_resource<R: Into<ResourceId>>(mut self, resource_id: Option<R>) -> Self {
        self.resource_id = resource_id.map(Into::into);
        self
    }

    #[must_use]
    pub fn before(mut self, value: Value) -> Self {
        self.before = Some(value);
        self
    }

    #[must_use]
    pub fn after(mut self, value: Value) -> Self {
        self.after = Some(value);
        self
    }

    #[must_use]
    pub fn metadata(mut self, value: Value) -> Self {
        self.metadata = Some(value);
        self
    }

    #[must_use]
    pub fn before_snapshot<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.before = self.serialize(value);
        self
    }

    #[must_use]
    pub fn after_snapshot<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.after = self.serialize(value);
        self
    }

    #[must_use]
    pub fn metadata_snapshot<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.metadata = self.serialize(value);
        self
    }

    /// First serialisation failure hit while attaching snapshots, if any.
    pub fn snapshot_error(&self) -> Option<&str> {
        self.snapshot_error.as_deref()
    }

    fn serialize<T: Serialize + ?Sized>(&mut self, value: &T) -> Option<Value> {
        match serde_json::to_value(value) {
            Ok(value) => Some(value),
            Err(err) => {
                self.snapshot_error.get_or_insert_with(|| err.to_string());
                None
            }
        }
    }
}
