//! Shared client utilities for API access, configuration and errors.
//!
//! Feature clients never build `reqwest` requests on their own: they go through
//! the gateway, which uses the helpers here for URL building and for turning
//! responses into typed values or sanitized [`AppError`]s. These helpers never see
//! passwords, but token-bearing headers pass through them, so nothing here logs
//! request headers or bodies.

pub(crate) mod api;
pub mod config;
pub mod errors;

pub use config::AppConfig;
pub use errors::{AppError, FieldError};
