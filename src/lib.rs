//! # CivicLink (officer client)
//!
//! `civiclink` is the client side of the CivicLink citizen-complaint platform. It
//! talks to the CivicLink REST backend on behalf of an officer and keeps a durable
//! session between invocations.
//!
//! ## Session Layer
//!
//! - **Session Store** ([`features::auth::SessionStore`]): holds the access/refresh
//!   token pair and the cached user profile, mirroring both to durable storage under
//!   two independent keys (`cl_tokens`, `cl_user`).
//! - **Authenticated Request Gateway** ([`features::auth::Gateway`]): attaches
//!   `Authorization: Bearer <access>` to every call and, on a `401`, refreshes the
//!   access token once and resends the original request exactly once. Refreshes are
//!   single-flight: concurrent `401`s share one refresh.
//! - **Role Guard** ([`features::auth::RoleGuard`]): gates officer-only paths and
//!   remembers where the caller was headed.
//!
//! Login only succeeds for officer profiles. Any other role forces a full logout
//! before the call fails, so partial login state is never observable.
//!
//! ## Feature Clients
//!
//! Complaint triage, citizen registration and the department directory are thin
//! typed wrappers over the gateway, so they inherit token refresh for free.

pub mod app_lib;
pub mod cli;
pub mod features;

pub use app_lib::{AppConfig, AppError};
pub use features::auth::{Gateway, GuardDecision, RoleGuard, SessionStore};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
