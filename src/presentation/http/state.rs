// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// Origins allowed by CORS; empty means same-origin only.
    pub allowed_origins: Vec<String>,
}
