//! Client configuration: where the API lives, where the session is persisted and
//! how long requests may take. Values here are not secret; tokens live in the
//! session directory, never in the config.

use super::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout (seconds) applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
/// Where officers land after login when no destination was recorded.
pub const OFFICER_LANDING_PATH: &str = "/officer/emergencies";
/// Login screen the role guard redirects to.
pub const OFFICER_LOGIN_PATH: &str = "/officer/login";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_dir: PathBuf,
    pub timeout: Duration,
    pub landing_path: String,
}

impl AppConfig {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            session_dir: default_session_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            landing_path: OFFICER_LANDING_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_session_dir(mut self, session_dir: impl Into<PathBuf>) -> Self {
        self.session_dir = session_dir.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_landing_path(mut self, landing_path: impl Into<String>) -> Self {
        self.landing_path = landing_path.into();
        self
    }

    /// # Errors
    /// Returns an error if the API base URL is empty, unparsable or not http(s).
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(AppError::Config("API base URL is not configured.".to_string()));
        }

        let url = Url::parse(base)
            .map_err(|err| AppError::Config(format!("Invalid API base URL {base}: {err}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::Config(format!(
                    "Unsupported API base URL scheme: {scheme}"
                )))
            }
        }

        if url.host().is_none() {
            return Err(AppError::Config(format!("API base URL has no host: {base}")));
        }

        if self.timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Per-user data directory for the durable session, falling back to the
/// working directory when the platform has none.
#[must_use]
pub fn default_session_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".civiclink"), |dir| dir.join("civiclink"))
}
