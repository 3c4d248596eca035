// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::audit::AuditWriter,
        ports::{security::Authenticator, time::Clock},
        queries::audit::AuditQueryService,
    },
    domain::audit::{AuditLogRepository, DiffOptions, RedactionPolicy},
};

pub struct ApplicationServices {
    pub audit_writer: Arc<AuditWriter>,
    pub audit_queries: Arc<AuditQueryService>,
    authenticator: Arc<dyn Authenticator>,
}

impl ApplicationServices {
    pub fn new(
        audit_log_repo: Arc<dyn AuditLogRepository>,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
        redaction: RedactionPolicy,
        diff_options: DiffOptions,
    ) -> Self {
        let audit_writer = Arc::new(AuditWriter::new(
            Arc::clone(&audit_log_repo),
            redaction,
            clock,
        ));
        let audit_queries =
            Arc::new(AuditQueryService::new(audit_log_repo).with_diff_options(diff_options));

        Self {
            audit_writer,
            audit_queries,
            authenticator,
        }
    }

    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(&self.authenticator)
    }
}
