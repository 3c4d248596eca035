use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub(super) fn ensure_audit_capability(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.has_capability("audit", "read") {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("missing capability audit:read"))
    }
}

/// `None` for missing or whitespace-only parameters.
pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a page number or size. Negative values saturate to zero so the
/// page request clamps them; anything non-numeric falls back to `default`.
pub(super) fn parse_count(raw: Option<&str>, default: u32) -> u32 {
    non_blank(raw)
        .and_then(|v| v.parse::<i64>().ok())
        .map_or(default, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}

/// Lower bound of a date filter. Unparseable input is no constraint.
pub(super) fn parse_start(raw: Option<&str>) -> Option<DateTime<Utc>> {
    non_blank(raw).and_then(parse_instant)
}

/// Upper bound of a date filter: the last millisecond of the UTC day the
/// input falls on, so a bare date covers the whole day.
pub(super) fn parse_end(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let instant = non_blank(raw).and_then(parse_instant)?;
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
    Some(instant.date_naive().and_time(end_of_day).and_utc())
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
