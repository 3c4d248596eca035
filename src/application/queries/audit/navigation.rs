use super::search::AuditLogListParams;
use crate::application::dto::{Navigation, PageLink};
use std::collections::BTreeSet;

/// Pages shown on each side of the current one.
pub const WINDOW_RADIUS: u32 = 2;

/// Page numbers to list: the first, the last, and a window around `current`.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<u32> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);
    let low = current.saturating_sub(WINDOW_RADIUS).max(1);
    let high = current.saturating_add(WINDOW_RADIUS).min(total_pages);

    let mut pages: BTreeSet<u32> = (low..=high).collect();
    pages.insert(1);
    pages.insert(total_pages);
    pages.into_iter().collect()
}

/// Page links for the audit listing. Every href keeps the caller's filters.
pub fn build_navigation(params: &AuditLogListParams, current: u32, total_pages: u32) -> Navigation {
    let total_pages = total_pages.max(1);
    let href = |page: u32| page_href(params, page);

    let mut pages = Vec::new();
    let mut last_listed: Option<u32> = None;
    for number in visible_pages(current, total_pages) {
        if last_listed.is_some_and(|prev| number > prev + 1) {
            pages.push(PageLink::Ellipsis);
        }
        pages.push(PageLink::Page {
            number,
            href: href(number),
            current: number == current,
        });
        last_listed = Some(number);
    }

    Navigation {
        previous: (current > 1).then(|| href((current - 1).min(total_pages))),
        next: (current < total_pages).then(|| href(current + 1)),
        pages,
    }
}

fn page_href(params: &AuditLogListParams, page: u32) -> String {
    let page = page.to_string();
    let mut pairs = params.preserved_pairs();
    pairs.push(("page", page.as_str()));
    // Plain string pairs always serialise.
    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("?{query}")
}
