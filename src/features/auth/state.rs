//! Session store: the single source of truth for the token pair and the cached
//! profile. Every mutation is written to durable storage before it becomes
//! visible in memory, so a restart rebuilds the same session without a network
//! round trip. The store is passed around explicitly (usually behind an `Arc`);
//! there is no ambient global session.

use crate::{
    app_lib::{AppConfig, AppError, api::http_client},
    features::auth::{
        client::{self, ME_PATH},
        gateway::{self, ApiRequest},
        storage::{SessionStorage, TOKENS_KEY, USER_KEY},
        types::{MeResponse, TokenPair, UserProfile},
    },
};
use reqwest::Client;
use secrecy::SecretString;
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

#[derive(Default)]
struct SessionState {
    tokens: Option<TokenPair>,
    user: Option<UserProfile>,
}

pub struct SessionStore {
    config: AppConfig,
    http: Client,
    storage: Arc<dyn SessionStorage>,
    state: RwLock<SessionState>,
    // Serializes refresh attempts; see `refresh_after`.
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("SessionStore")
            .field("api_base_url", &self.config.api_base_url)
            .field("tokens", &state.tokens.as_ref().map(|_| "***"))
            .field("user", &state.user.as_ref().map(|u| &u.username))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Opens the store and hydrates it from durable storage.
    ///
    /// Malformed entries are discarded rather than reported, and a cached profile
    /// without a token pair is dropped: both degrade to "logged out".
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the storage backend fails.
    pub fn open(config: AppConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, AppError> {
        config.validate()?;
        let http = http_client(&config)?;

        let tokens = match storage.load(TOKENS_KEY)? {
            Some(raw) => {
                let tokens = TokenPair::from_json(&raw);
                if tokens.is_none() {
                    warn!("discarding malformed stored token pair");
                    storage.remove(TOKENS_KEY)?;
                }
                tokens
            }
            None => None,
        };

        let user = if tokens.is_some() {
            match storage.load(USER_KEY)? {
                Some(raw) => {
                    let user = serde_json::from_str::<UserProfile>(&raw).ok();
                    if user.is_none() {
                        warn!("discarding malformed stored profile");
                        storage.remove(USER_KEY)?;
                    }
                    user
                }
                None => None,
            }
        } else {
            storage.remove(USER_KEY)?;
            None
        };

        debug!(
            authenticated = tokens.is_some(),
            profile_cached = user.is_some(),
            "session hydrated"
        );

        Ok(Self {
            config,
            http,
            storage,
            state: RwLock::new(SessionState { tokens, user }),
            refresh_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    #[must_use]
    pub fn tokens(&self) -> Option<TokenPair> {
        self.read_state().tokens.clone()
    }

    /// Cached profile. Never returned without a token pair.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        let state = self.read_state();
        state.tokens.as_ref().and(state.user.clone())
    }

    /// Authentication is decided by token presence, not profile presence.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state().tokens.is_some()
    }

    /// Signs in an officer.
    ///
    /// Stores the token pair, then fetches the profile. A profile that is missing
    /// or not an officer forces a full logout before the call fails.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` when the backend rejects the credentials,
    /// `UnauthorizedRole` when the account is not an officer, or a transport or
    /// storage error.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserProfile, AppError> {
        let tokens =
            client::obtain_token(&self.http, &self.config.api_base_url, username, password)
                .await?;
        self.begin_session(tokens)?;

        match self.fetch_profile().await {
            Some(profile) if profile.is_officer() => {
                info!(username = %profile.username, "officer signed in");
                Ok(profile)
            }
            profile => {
                warn!(
                    role = ?profile.map(|p| p.role),
                    "login rejected: account is not an officer"
                );
                if let Err(err) = self.logout() {
                    error!("Failed to clear rejected session: {}", err);
                }
                Err(AppError::UnauthorizedRole)
            }
        }
    }

    /// Clears the session from memory and durable storage. Safe to call twice.
    ///
    /// Memory is always cleared, even if the storage backend fails.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub fn logout(&self) -> Result<(), AppError> {
        {
            let mut state = self.write_state();
            state.tokens = None;
            state.user = None;
        }

        let tokens = self.storage.remove(TOKENS_KEY);
        let user = self.storage.remove(USER_KEY);
        debug!("session cleared");
        tokens.and(user)
    }

    /// Fetches and caches the current profile.
    ///
    /// Returns `None` without a network call when there is no access token. Any
    /// failure is swallowed: token recovery belongs to the gateway.
    pub async fn fetch_profile(&self) -> Option<UserProfile> {
        if !self.is_authenticated() {
            return None;
        }

        let response = match gateway::execute(self, ApiRequest::get(ME_PATH)).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Profile lookup failed: {}", err);
                return None;
            }
        };

        let me: MeResponse = match response.json().await {
            Ok(me) => me,
            Err(err) => {
                warn!("Failed to decode profile: {}", err);
                return None;
            }
        };

        let profile = UserProfile::from(me);
        match self.set_user(&profile) {
            Ok(true) => Some(profile),
            Ok(false) => {
                debug!("session ended during profile lookup");
                None
            }
            Err(err) => {
                warn!("Failed to persist profile: {}", err);
                None
            }
        }
    }

    /// Returns the cached profile, fetching it once when a session has none.
    pub async fn ensure_profile(&self) -> Option<UserProfile> {
        if let Some(user) = self.user() {
            return Some(user);
        }
        if !self.is_authenticated() {
            return None;
        }
        self.fetch_profile().await
    }

    /// Rotates the access token after a `401` on a request sent with `stale_access`.
    ///
    /// Refreshes are serialized. A waiter that finds the access token already
    /// rotated reuses it instead of refreshing again.
    pub(crate) async fn refresh_after(&self, stale_access: Option<&str>) -> Result<String, AppError> {
        let _guard = self.refresh_lock.lock().await;

        let Some(tokens) = self.tokens() else {
            return Err(session_ended());
        };

        if stale_access != Some(tokens.access()) {
            debug!("access token already rotated by a concurrent refresh");
            return Ok(tokens.access().to_string());
        }

        let access =
            client::refresh_access(&self.http, &self.config.api_base_url, tokens.refresh())
                .await?;

        // A logout or login may have finished while the refresh was in flight.
        let mut state = self.write_state();
        match state.tokens.as_ref() {
            Some(current)
                if current.access() == tokens.access() && current.refresh() == tokens.refresh() => {}
            Some(current) => {
                debug!("session replaced during refresh; discarding refreshed token");
                return Ok(current.access().to_string());
            }
            None => {
                debug!("session ended during refresh; discarding refreshed token");
                return Err(session_ended());
            }
        }

        let rotated = tokens.with_access(access.clone());
        self.persist_tokens(&rotated)?;
        state.tokens = Some(rotated);
        debug!("access token refreshed");

        Ok(access)
    }

    /// Replaces the token pair wholesale; the previous profile no longer applies.
    fn begin_session(&self, tokens: TokenPair) -> Result<(), AppError> {
        let mut state = self.write_state();
        self.persist_tokens(&tokens)?;
        self.storage.remove(USER_KEY)?;

        state.tokens = Some(tokens);
        state.user = None;
        Ok(())
    }

    /// Caches the profile if a session still exists; returns whether it did.
    fn set_user(&self, user: &UserProfile) -> Result<bool, AppError> {
        if !self.is_authenticated() {
            return Ok(false);
        }

        let raw = serde_json::to_string(user)
            .map_err(|err| AppError::Serialization(format!("Failed to encode profile: {err}")))?;
        self.storage.store(USER_KEY, &raw)?;

        let mut state = self.write_state();
        if state.tokens.is_none() {
            drop(state);
            self.storage.remove(USER_KEY)?;
            return Ok(false);
        }
        state.user = Some(user.clone());
        Ok(true)
    }

    fn persist_tokens(&self, tokens: &TokenPair) -> Result<(), AppError> {
        let raw = tokens
            .to_json()
            .map_err(|err| AppError::Serialization(format!("Failed to encode tokens: {err}")))?;
        self.storage.store(TOKENS_KEY, &raw)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn session_ended() -> AppError {
    AppError::Http {
        status: 401,
        message: "Session ended before the token could be refreshed.".to_string(),
    }
}
