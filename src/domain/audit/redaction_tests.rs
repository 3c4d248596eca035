// src/domain/audit/redaction_tests.rs
#[cfg(test)]
mod tests {
    use crate::domain::audit::redaction::{
        MAX_DEPTH_MARKER, REDACTED_SENTINEL, RedactionPolicy, TRUNCATION_MARKER,
    };
    use serde_json::{Value, json};

    #[test]
    fn denylisted_keys_are_masked_at_any_depth_regardless_of_type() {
        let policy = RedactionPolicy::default();
        let input = json!({
            "password": "hunter2",
            "profile": {
                "token": { "access": "abc", "refresh": "def" },
                "ssn": 123456789,
                "tags": [{ "Password": ["x", "y"] }, "plain"]
            }
        });

        let out = policy.redact(&input);

        assert_eq!(out["password"], REDACTED_SENTINEL);
        assert_eq!(out["profile"]["token"], REDACTED_SENTINEL);
        assert_eq!(out["profile"]["ssn"], REDACTED_SENTINEL);
        assert_eq!(out["profile"]["tags"][0]["Password"], REDACTED_SENTINEL);
        assert_eq!(out["profile"]["tags"][1], "plain");
    }

    #[test]
    fn key_matching_is_case_insensitive_and_keeps_key_names() {
        let policy = RedactionPolicy::default();
        let out = policy.redact(&json!({ "PassWord": "a", "TOKEN": "b", "name": "Bob" }));

        let keys: Vec<&str> = out
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["PassWord", "TOKEN", "name"]);
        assert_eq!(out["PassWord"], REDACTED_SENTINEL);
        assert_eq!(out["TOKEN"], REDACTED_SENTINEL);
        assert_eq!(out["name"], "Bob");
    }

    #[test]
    fn non_sensitive_values_are_structurally_unchanged() {
        let policy = RedactionPolicy::default();
        let input = json!({
            "subject": "Printer down",
            "priority": "High",
            "count": 3,
            "ratio": 0.5,
            "open": true,
            "assignee": null,
            "history": [1, "two", { "three": 3 }, [4]]
        });

        assert_eq!(policy.redact(&input), input);
    }

    #[test]
    fn scalars_and_null_pass_through() {
        let policy = RedactionPolicy::default();
        for value in [json!(null), json!(true), json!(42), json!(-1.25), json!("short")] {
            assert_eq!(policy.redact(&value), value);
        }
    }

    #[test]
    fn long_strings_are_truncated_to_limit_plus_marker() {
        let policy = RedactionPolicy::default();
        let long = "x".repeat(10_001);

        let out = policy.redact(&Value::String(long));
        let s = out.as_str().expect("string");

        assert_eq!(s.chars().count(), 10_000 + TRUNCATION_MARKER.chars().count());
        assert!(s.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn strings_at_the_limit_are_left_alone() {
        let policy = RedactionPolicy::new(["password"], 5);
        assert_eq!(policy.redact(&json!("abcde")), json!("abcde"));
        assert_eq!(policy.redact(&json!("abcdef")), json!("abcde...(truncated)"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let policy = RedactionPolicy::new(["password"], 3);
        assert_eq!(policy.redact(&json!("ééééé")), json!("ééé...(truncated)"));
    }

    #[test]
    fn arrays_keep_order_and_length() {
        let policy = RedactionPolicy::new(["secret"], 4);
        let out = policy.redact(&json!(["abcdefg", { "secret": 1 }, 2]));
        assert_eq!(out, json!(["abcd...(truncated)", { "secret": REDACTED_SENTINEL }, 2]));
    }

    #[test]
    fn additional_keys_extend_the_defaults() {
        let policy = RedactionPolicy::default().with_additional_keys([" ApiKey ", ""]);
        let out = policy.redact(&json!({ "apikey": "k", "password": "p", "email": "a@b.c" }));
        assert_eq!(out["apikey"], REDACTED_SENTINEL);
        assert_eq!(out["password"], REDACTED_SENTINEL);
        assert_eq!(out["email"], "a@b.c");
    }

    #[test]
    fn nesting_beyond_max_depth_is_replaced_with_marker() {
        let policy = RedactionPolicy::default().with_max_depth(2);
        let out = policy.redact(&json!({ "a": { "b": { "c": 1 } }, "n": 1 }));
        assert_eq!(out, json!({ "a": { "b": MAX_DEPTH_MARKER }, "n": 1 }));
    }

    #[test]
    fn redacted_snapshot_serializes_transparently() {
        let policy = RedactionPolicy::default();
        let sealed = policy.redact_snapshot(&json!({ "token": "t", "id": 7 }));
        let encoded = serde_json::to_value(&sealed).expect("serialize");
        assert_eq!(encoded, json!({ "token": REDACTED_SENTINEL, "id": 7 }));
        assert_eq!(sealed.into_value(), encoded);
    }
}
