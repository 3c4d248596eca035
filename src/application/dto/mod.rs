pub mod audit;
pub mod auth;
pub mod pagination;
pub mod serde_time;

pub use audit::{AuditLogDto, AuditLogPageView, AuditLogRowView, PageSummary};
pub use auth::AuthenticatedUser;
pub use pagination::{Navigation, PageLink, PaginatedResult};
