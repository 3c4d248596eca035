mod common;
mod labels;
mod navigation;
mod search;
mod service;


pub use labels::action_label;
pub use navigation::{WINDOW_RADIUS, build_navigation, visible_pages};
pub use search::AuditLogListParams;
pub use service::AuditQueryService;
