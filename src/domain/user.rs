// src/domain/user.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{collections::HashSet, fmt, str::FromStr};

/// Identifier of the actor an audit entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            return Err(DomainError::Validation(format!(
                "user id must be positive, got {id}"
            )));
        }
        Ok(Self(id))
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts the raw `userId` filter value; surrounding whitespace is ignored.
impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::Validation(format!("'{s}' is not a user id")))?;
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    pub resource: &'static str,
    pub action: &'static str,
}

impl Capability {
    pub const fn new(resource: &'static str, action: &'static str) -> Self {
        Self { resource, action }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

pub const AUDIT_READ: Capability = Capability::new("audit", "read");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Audit history is an admin-only view; regular users only produce entries.
    pub fn default_capabilities(&self) -> HashSet<Capability> {
        match self {
            Role::Admin => HashSet::from([AUDIT_READ]),
            Role::User => HashSet::new(),
        }
    }
}
