use std::sync::Arc;

use crate::domain::audit::{DiffOptions, repository::AuditLogRepository};

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) diff_options: DiffOptions,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self {
            repo,
            diff_options: DiffOptions::default(),
        }
    }

    #[must_use]
    pub fn with_diff_options(mut self, diff_options: DiffOptions) -> Self {
        self.diff_options = diff_options;
        self
    }
}
