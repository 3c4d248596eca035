// tests/audit_writer_tests.rs
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use ticket_audit::{
    application::{
        ApplicationResult,
        commands::audit::{AuditRecord, AuditSink, AuditWriter, FailurePolicy},
        error::ApplicationError,
    },
    domain::{
        audit::{AuditLogFilter, AuditLogRepository, NewAuditLog, PageRequest, RedactionPolicy},
        user::UserId,
    },
    infrastructure::repositories::InMemoryAuditLogRepository,
};

mod support;

use support::{CapturingAuditRepo, FailingAuditRepo, FailingTransaction, FixedClock, fixed_now};

fn writer(repo: Arc<dyn AuditLogRepository>) -> AuditWriter {
    AuditWriter::new(repo, RedactionPolicy::default(), Arc::new(FixedClock::default()))
}

async fn stored(repo: &InMemoryAuditLogRepository) -> u64 {
    repo.search(&AuditLogFilter::default(), PageRequest::default())
        .await
        .unwrap()
        .1
}

fn close_ticket() -> AuditRecord {
    AuditRecord::new("ticket.close", "Ticket")
        .actor(UserId(7))
        .resource(42)
        .before(json!({ "status": "OPEN" }))
        .after(json!({ "status": "CLOSED" }))
}

/// map keys that are not strings cannot become JSON
fn unserializable() -> HashMap<(i32, i32), i32> {
    HashMap::from([((1, 2), 3)])
}

#[tokio::test]
async fn standalone_write_persists_with_clock_timestamp() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));

    writer.record(close_ticket()).await;

    let (items, total) = repo
        .search(&AuditLogFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].action, "ticket.close");
    assert_eq!(items[0].created_at, fixed_now());
    assert_eq!(items[0].user_id, Some(UserId(7)));
}

#[tokio::test]
async fn standalone_write_failure_never_reaches_the_caller() {
    let writer = writer(Arc::new(FailingAuditRepo));

    // returns (), no panic, no error
    writer.record(close_ticket()).await;
    writer.record(AuditRecord::new("auth.logout", "User")).await;

    assert_eq!(writer.standalone_sink().dropped_writes(), 2);
}

#[tokio::test]
async fn standalone_serialization_failure_is_absorbed() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));

    writer
        .record(AuditRecord::new("ticket.update", "Ticket").after_snapshot(&unserializable()))
        .await;

    assert_eq!(writer.standalone_sink().dropped_writes(), 1);
    assert_eq!(stored(&repo).await, 0);
}

#[tokio::test]
async fn committed_transaction_makes_entry_visible() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));

    let mut tx = repo.begin();
    writer.record_in(&mut tx, close_ticket()).await.unwrap();
    assert_eq!(stored(&repo).await, 0, "pending until commit");
    tx.commit().unwrap();

    assert_eq!(stored(&repo).await, 1);
}

#[tokio::test]
async fn rolled_back_transaction_leaves_no_entry() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));

    let mut tx = repo.begin();
    writer.record_in(&mut tx, close_ticket()).await.unwrap();
    assert_eq!(tx.pending(), 1);
    tx.rollback();

    assert_eq!(stored(&repo).await, 0);
}

#[tokio::test]
async fn dropped_transaction_discards_entry() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));

    {
        let mut tx = repo.begin();
        writer.record_in(&mut tx, close_ticket()).await.unwrap();
    }

    assert!(repo.is_empty().unwrap());
}

#[tokio::test]
async fn transactional_insert_failure_propagates() {
    let writer = writer(Arc::new(InMemoryAuditLogRepository::new()));
    let mut tx = FailingTransaction::default();

    let err = writer.record_in(&mut tx, close_ticket()).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(_)));
    assert_eq!(tx.attempts, 1);
    assert_eq!(writer.standalone_sink().dropped_writes(), 0);
}

#[tokio::test]
async fn transactional_serialization_failure_propagates() {
    let repo = InMemoryAuditLogRepository::new();
    let writer = writer(Arc::new(repo.clone()));
    let mut tx = repo.begin();

    let result = writer
        .record_in(
            &mut tx,
            AuditRecord::new("ticket.update", "Ticket").before_snapshot(&unserializable()),
        )
        .await;

    assert!(matches!(result, Err(ApplicationError::Snapshot(_))));
    assert_eq!(tx.pending(), 0);
}

#[tokio::test]
async fn snapshots_are_redacted_before_storage() {
    let repo = CapturingAuditRepo::new();
    let writer = writer(Arc::new(repo.clone()));

    writer
        .record(
            AuditRecord::new("auth.register", "User")
                .after(json!({ "name": "Alice", "Password": "hunter2", "profile": { "ssn": 123 } }))
                .metadata(json!({ "token": ["a", "b"], "ip": "127.0.0.1" })),
        )
        .await;

    let captured = writer_capture(&repo);
    assert_eq!(
        captured.after.as_ref().map(|v| v.as_value().clone()),
        Some(json!({
            "name": "Alice",
            "Password": "[REDACTED]",
            "profile": { "ssn": "[REDACTED]" }
        }))
    );
    assert_eq!(
        captured.metadata.as_ref().map(|v| v.as_value().clone()),
        Some(json!({ "token": "[REDACTED]", "ip": "127.0.0.1" }))
    );
    assert!(captured.before.is_none());
}

#[tokio::test]
async fn resource_ids_and_null_snapshots_are_normalised() {
    let repo = CapturingAuditRepo::new();
    let writer = writer(Arc::new(repo.clone()));

    writer
        .record(
            AuditRecord::new("ticket.delete", "Ticket")
                .resource(42_i64)
                .before(Value::Null),
        )
        .await;
    writer
        .record(AuditRecord::new("auth.logout", "User").maybe_resource(None::<i64>))
        .await;

    let captured = repo.captured();
    assert_eq!(captured[0].resource_id.as_ref().map(|id| id.as_str()), Some("42"));
    assert!(captured[0].before.is_none());
    assert!(captured[1].resource_id.is_none());
    assert!(captured[1].user_id.is_none());
}

#[tokio::test]
async fn serialize_snapshots_from_typed_values() {
    #[derive(serde::Serialize)]
    struct Ticket<'a> {
        title: &'a str,
        status: &'a str,
        token: &'a str,
    }

    let repo = CapturingAuditRepo::new();
    let writer = writer(Arc::new(repo.clone()));
    let ticket = Ticket {
        title: "Printer jam",
        status: "OPEN",
        token: "s3cret",
    };

    writer
        .record(AuditRecord::new("ticket.create", "Ticket").after_snapshot(&ticket))
        .await;

    let after = writer_capture(&repo).after.unwrap().into_value();
    assert_eq!(
        after,
        json!({ "title": "Printer jam", "status": "OPEN", "token": "[REDACTED]" })
    );
}

/// 独自シンクの失敗ポリシーがそのまま適用されることを確認する
#[tokio::test]
async fn custom_sink_policy_is_honoured() {
    struct Collecting {
        logs: Vec<NewAuditLog>,
        fail: bool,
        policy: FailurePolicy,
        dropped: std::cell::Cell<usize>,
    }

    #[async_trait]
    impl AuditSink for Collecting {
        fn failure_policy(&self) -> FailurePolicy {
            self.policy
        }

        async fn persist(&mut self, log: NewAuditLog) -> ApplicationResult<()> {
            if self.fail {
                return Err(ApplicationError::infrastructure("sink offline"));
            }
            self.logs.push(log);
            Ok(())
        }

        fn write_dropped(&self, _err: &ApplicationError) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    let writer = writer(Arc::new(InMemoryAuditLogRepository::new()));

    let mut ok = Collecting {
        logs: Vec::new(),
        fail: false,
        policy: FailurePolicy::Propagate,
        dropped: Default::default(),
    };
    writer.record_with(&mut ok, close_ticket()).await.unwrap();
    assert_eq!(ok.logs.len(), 1);

    let mut absorbing = Collecting {
        logs: Vec::new(),
        fail: true,
        policy: FailurePolicy::Absorb,
        dropped: Default::default(),
    };
    writer.record_with(&mut absorbing, close_ticket()).await.unwrap();
    assert_eq!(absorbing.dropped.get(), 1);

    let mut propagating = Collecting {
        logs: Vec::new(),
        fail: true,
        policy: FailurePolicy::Propagate,
        dropped: Default::default(),
    };
    let sink: &mut dyn AuditSink = &mut propagating;
    assert!(writer.record_with(sink, close_ticket()).await.is_err());
    assert_eq!(propagating.dropped.get(), 0);
}

fn writer_capture(repo: &CapturingAuditRepo) -> NewAuditLog {
    repo.captured().pop().expect("one entry captured")
}
