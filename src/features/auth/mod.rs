//! Auth feature module: the durable session store, the authenticated request
//! gateway and the officer role guard. This module touches security boundaries
//! and must avoid logging secrets or token material.
//!
//! Flow Overview: Login exchanges credentials for a token pair, persists it, then
//! fetches the profile and rejects non-officers with a full logout. Protected
//! calls go through the gateway, which refreshes the access token once on `401`
//! and logs out when the refresh itself fails. Restarting rebuilds the session
//! from storage and fetches the profile at most once.

pub mod client;
pub mod gateway;
pub mod guards;
pub mod state;
pub mod storage;
pub mod types;

pub use gateway::{ApiRequest, Gateway};
pub use guards::{GuardDecision, RoleGuard};
pub use state::SessionStore;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use types::{Role, TokenPair, UserProfile};
