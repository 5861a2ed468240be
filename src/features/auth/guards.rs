//! Route guard for officer-only screens.
//!
//! UX-only guard; real access control must live on the API. The decision is a
//! pure function of the session, so callers decide how to render or redirect.

use crate::{
    app_lib::config::{OFFICER_LANDING_PATH, OFFICER_LOGIN_PATH},
    features::auth::{state::SessionStore, types::Role},
};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Go to `to`, remembering `from` so login can send the user back.
    Redirect { to: String, from: String },
}

#[derive(Clone, Debug)]
pub struct RoleGuard {
    required: Role,
    login_path: String,
    landing_path: String,
}

impl RoleGuard {
    #[must_use]
    pub fn officer() -> Self {
        Self {
            required: Role::Officer,
            login_path: OFFICER_LOGIN_PATH.to_string(),
            landing_path: OFFICER_LANDING_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_landing_path(mut self, landing_path: impl Into<String>) -> Self {
        self.landing_path = landing_path.into();
        self
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decides from the session's current state without touching the network.
    ///
    /// A session with tokens but no cached profile is redirected; callers that
    /// want to hydrate first should call `SessionStore::ensure_profile`.
    #[must_use]
    pub fn check(&self, session: &SessionStore, path: &str) -> GuardDecision {
        let role = session.user().map(|user| user.role);
        let decision = self.decide(session.is_authenticated(), role, path);
        debug!(path, ?role, ?decision, "role guard evaluated");
        decision
    }

    #[must_use]
    pub fn decide(&self, authenticated: bool, role: Option<Role>, path: &str) -> GuardDecision {
        if authenticated && role == Some(self.required) {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect {
                to: self.login_path.clone(),
                from: path.to_string(),
            }
        }
    }

    /// Where to navigate after a successful login.
    ///
    /// Only same-site absolute paths are honored; anything else, including the
    /// login screen itself, falls back to the landing path.
    #[must_use]
    pub fn destination_after_login(&self, from: Option<&str>) -> String {
        match from.map(str::trim) {
            Some(path)
                if path.starts_with('/')
                    && !path.starts_with("//")
                    && path != self.login_path =>
            {
                path.to_string()
            }
            _ => self.landing_path.clone(),
        }
    }
}

impl Default for RoleGuard {
    fn default() -> Self {
        Self::officer()
    }
}
