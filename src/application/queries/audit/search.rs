use super::{AuditQueryService, common, labels, navigation};
use crate::{
    application::{
        dto::{
            AuditLogDto, AuditLogPageView, AuditLogRowView, AuthenticatedUser, PageSummary,
            PaginatedResult,
        },
        error::ApplicationResult,
    },
    domain::{
        audit::{
            AuditLog, AuditLogFilter, PageRequest, ResourceId, format_changes,
            query::DEFAULT_PAGE_SIZE,
        },
        user::UserId,
    },
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::IntoParams;

/// Raw listing parameters as they arrive on a query string. Every field is
/// optional; blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AuditLogListParams {
    /// Exact id of the acting user.
    pub user_id: Option<String>,
    /// Case-insensitive substring of the action, e.g. `ticket`.
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    /// Inclusive lower bound: `YYYY-MM-DD`, RFC 3339 or `YYYY-MM-DDTHH:MM[:SS]`.
    pub start: Option<String>,
    /// Inclusive upper bound, extended to the end of its UTC day.
    pub end: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl AuditLogListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            common::parse_count(self.page.as_deref(), 1),
            common::parse_count(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }

    /// The filter these parameters describe, or `None` when they can match
    /// nothing (a user id that is not a positive integer).
    pub fn filter(&self) -> Option<AuditLogFilter> {
        let user_id = match common::non_blank(self.user_id.as_deref()) {
            Some(raw) => Some(raw.parse::<UserId>().ok()?),
            None => None,
        };

        Some(AuditLogFilter {
            user_id,
            action: common::non_blank(self.action.as_deref()).map(str::to_owned),
            resource_type: common::non_blank(self.resource_type.as_deref()).map(str::to_owned),
            resource_id: common::non_blank(self.resource_id.as_deref()).map(ResourceId::from),
            created_from: common::parse_start(self.start.as_deref()),
            created_until: common::parse_end(self.end.as_deref()),
        })
    }

    /// Supplied filters (and page size) in a fixed order, for page links.
    pub(super) fn preserved_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("userId", &self.user_id),
            ("action", &self.action),
            ("resourceType", &self.resource_type),
            ("resourceId", &self.resource_id),
            ("start", &self.start),
            ("end", &self.end),
            ("pageSize", &self.page_size),
        ]
        .into_iter()
        .filter_map(|(key, value)| common::non_blank(value.as_deref()).map(|v| (key, v)))
        .collect()
    }
}

impl AuditQueryService {
    /// Entries matching `filter`, newest first, with the total match count.
    pub async fn query(
        &self,
        actor: &AuthenticatedUser,
        filter: AuditLogFilter,
        page: PageRequest,
    ) -> ApplicationResult<PaginatedResult<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let (items, total) = self.repo.search(&filter, page).await?;
        Ok(
            PaginatedResult::new(items, total, page.page(), page.page_size())
                .map(AuditLogDto::from),
        )
    }

    /// One rendered page of audit history: labelled rows with change
    /// summaries, a "Showing X - Y of Z" line, and page links.
    pub async fn browse(
        &self,
        actor: &AuthenticatedUser,
        params: AuditLogListParams,
    ) -> ApplicationResult<AuditLogPageView> {
        common::ensure_audit_capability(actor)?;
        let page = params.page_request();

        let (logs, total) = match params.filter() {
            Some(filter) => self.repo.search(&filter, page).await?,
            None => {
                debug!(user_id = ?params.user_id, "user id filter matches nothing");
                (Vec::new(), 0)
            }
        };

        let offset = page.offset();
        let rows: Vec<AuditLogRowView> = (offset + 1..)
            .zip(&logs)
            .map(|(number, log)| self.row(number, log))
            .collect();
        let shown = u64::try_from(rows.len()).unwrap_or(u64::MAX);

        let listing = PaginatedResult::new(rows, total, page.page(), page.page_size());
        let total_pages = listing.total_pages.max(1);

        Ok(AuditLogPageView {
            summary: PageSummary::new(offset, shown, total),
            navigation: navigation::build_navigation(&params, page.page(), total_pages),
            rows: listing.items,
            page: listing.page,
            page_size: listing.page_size,
            total_pages,
        })
    }

    fn row(&self, number: u64, log: &AuditLog) -> AuditLogRowView {
        let resource_id = log.resource_id.as_ref().map(ResourceId::as_str);
        AuditLogRowView {
            number,
            id: log.id,
            date: log.created_at.format("%Y-%m-%d").to_string(),
            time: log.created_at.format("%H:%M:%S").to_string(),
            user: log
                .actor_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_owned()),
            action: labels::action_label(&log.action, &log.resource_type, resource_id),
            changes: format_changes(log.before.as_ref(), log.after.as_ref(), self.diff_options),
        }
    }
}
