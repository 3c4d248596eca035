// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod repos;
pub mod security;
pub mod time;

// 時刻関連
pub use time::{FixedClock, fixed_now};

// セキュリティ関連
pub use security::{DummyAuthenticator, NO_AUDIT_TOKEN, TEST_TOKEN};

// 監査ログ関連
pub use audit::{entry, entry_at};

// リポジトリ関連（監査ログ）
pub use repos::{CapturingAuditRepo, FailingAuditRepo, FailingTransaction};
