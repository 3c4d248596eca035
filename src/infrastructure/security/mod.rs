// src/infrastructure/security/mod.rs
pub mod api_key;
