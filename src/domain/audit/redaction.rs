// src/domain/audit/redaction.rs
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

pub const REDACTED_SENTINEL: &str = "[REDACTED]";
pub const TRUNCATION_MARKER: &str = "...(truncated)";
pub const MAX_DEPTH_MARKER: &str = "[MAX DEPTH]";

pub const DEFAULT_REDACT_KEYS: [&str; 3] = ["password", "token", "ssn"];
pub const DEFAULT_MAX_STRING_LENGTH: usize = 10_000;
/// Same bound serde_json applies when parsing, so anything that came in over
/// the wire fits.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Masks sensitive keys and truncates oversized strings in arbitrary JSON.
///
/// Key matching is case-insensitive. A matched key keeps its name and its
/// value is replaced with [`REDACTED_SENTINEL`] whatever its type; the value is
/// not traversed. Everything else is copied structurally, so the policy is a
/// pure function of its input.
#[derive(Debug, Clone)]
pub struct RedactionPolicy {
    denylist: HashSet<String>,
    max_string_length: usize,
    max_depth: usize,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REDACT_KEYS, DEFAULT_MAX_STRING_LENGTH)
    }
}

impl RedactionPolicy {
    pub fn new<I, S>(keys: I, max_string_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            denylist: keys
                .into_iter()
                .map(|key| key.as_ref().trim().to_lowercase())
                .filter(|key| !key.is_empty())
                .collect(),
            max_string_length,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Extend the denylist; existing keys are kept.
    #[must_use]
    pub fn with_additional_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.denylist.extend(
            keys.into_iter()
                .map(|key| key.as_ref().trim().to_lowercase())
                .filter(|key| !key.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_string_length(&self) -> usize {
        self.max_string_length
    }

    pub fn is_denied(&self, key: &str) -> bool {
        self.denylist.contains(&key.to_lowercase())
    }

    pub fn redact(&self, value: &Value) -> Value {
        self.redact_at(value, 0)
    }

    /// Redact a snapshot and seal it so it can be persisted.
    pub fn redact_snapshot(&self, value: &Value) -> Redacted {
        Redacted(self.redact(value))
    }

    fn redact_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::Array(_) | Value::Object(_) if depth >= self.max_depth => {
                Value::String(MAX_DEPTH_MARKER.to_owned())
            }
            Value::String(s) => Value::String(self.truncate(s)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.redact_at(item, depth + 1))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| {
                        let redacted = if self.is_denied(key) {
                            Value::String(REDACTED_SENTINEL.to_owned())
                        } else {
                            self.redact_at(item, depth + 1)
                        };
                        (key.clone(), redacted)
                    })
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }

    fn truncate(&self, s: &str) -> String {
        match s.char_indices().nth(self.max_string_length) {
            Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &s[..cut]),
            None => s.to_owned(),
        }
    }
}

/// A JSON value that has passed through a [`RedactionPolicy`].
///
/// Only the policy can build one, which keeps raw snapshots out of the write
/// model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Redacted(Value);

impl Redacted {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
