// src/domain/audit/diff.rs
//! Human-readable summaries of what changed between two audit snapshots.
//!
//! The output is a preview, not a complete diff: only top-level keys and one
//! level of nesting are inspected, arrays are compared as wholes, and
//! collection stops once `max_fields` changes have been found.
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const DEFAULT_MAX_FIELDS: usize = 3;
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 200;
const NESTED_KEY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub max_fields: usize,
    pub max_value_length: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_fields: DEFAULT_MAX_FIELDS,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
        }
    }
}

/// One changed field. `None` means the key was missing on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub path: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

impl FieldChange {
    fn new(path: String, before: Option<&Value>, after: Option<&Value>) -> Self {
        Self {
            path,
            before: before.cloned(),
            after: after.cloned(),
        }
    }

    pub fn render(&self, max_value_length: usize) -> String {
        format!(
            "{}: {} changed to {}",
            capitalize(&self.path),
            stringify(self.before.as_ref(), max_value_length),
            stringify(self.after.as_ref(), max_value_length),
        )
    }
}

pub fn format_changes(
    before: Option<&Value>,
    after: Option<&Value>,
    options: DiffOptions,
) -> Vec<String> {
    collect_changes(before, after, options.max_fields)
        .iter()
        .map(|change| change.render(options.max_value_length))
        .collect()
}

pub fn collect_changes(
    before: Option<&Value>,
    after: Option<&Value>,
    max_fields: usize,
) -> Vec<FieldChange> {
    if max_fields == 0 || (is_absent(before) && is_absent(after)) {
        return Vec::new();
    }

    let empty = Map::new();
    let before = as_object(before).unwrap_or(&empty);
    let after = as_object(after).unwrap_or(&empty);

    let keys: BTreeSet<&str> = before
        .keys()
        .chain(after.keys())
        .map(String::as_str)
        .collect();

    let mut changes = Vec::new();
    for key in keys {
        let old = before.get(key);
        let new = after.get(key);
        if old == new {
            continue;
        }

        if let (Some(Value::Object(old_nested)), Some(Value::Object(new_nested))) = (old, new) {
            let mut nested_found = false;
            for nested_key in union_in_order(old_nested, new_nested)
                .into_iter()
                .take(NESTED_KEY_LIMIT)
            {
                let nested_old = old_nested.get(nested_key);
                let nested_new = new_nested.get(nested_key);
                if nested_old != nested_new {
                    changes.push(FieldChange::new(
                        format!("{key}.{nested_key}"),
                        nested_old,
                        nested_new,
                    ));
                    nested_found = true;
                }
                if changes.len() >= max_fields {
                    break;
                }
            }
            if nested_found {
                if changes.len() >= max_fields {
                    break;
                }
                continue;
            }
        }

        changes.push(FieldChange::new(key.to_owned(), old, new));
        if changes.len() >= max_fields {
            break;
        }
    }

    changes
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn as_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// Keys of `first` in order, then keys only present in `second`.
fn union_in_order<'a>(
    first: &'a Map<String, Value>,
    second: &'a Map<String, Value>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.extend(
        second
            .keys()
            .map(String::as_str)
            .filter(|key| !first.contains_key(*key)),
    );
    keys
}

fn capitalize(path: &str) -> String {
    let mut chars = path.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn stringify(value: Option<&Value>, max_len: usize) -> String {
    match value {
        None => "undefined".to_owned(),
        Some(Value::Null) => "null".to_owned(),
        Some(Value::String(s)) => {
            let collapsed = collapse_newlines(s);
            match prefix_chars(&collapsed, max_len) {
                Some(prefix) => format!("\"{prefix}... (truncated)\""),
                None => format!("\"{collapsed}\""),
            }
        }
        Some(other) => {
            let encoded = other.to_string();
            match prefix_chars(&encoded, max_len) {
                Some(prefix) => format!("{prefix}..."),
                None => encoded,
            }
        }
    }
}

fn collapse_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c == '\n' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// The first `max` chars of `s`, or `None` when `s` already fits.
fn prefix_chars(s: &str, max: usize) -> Option<&str> {
    s.char_indices().nth(max).map(|(cut, _)| &s[..cut])
}
