//! Session and auth payload types. Token material is wrapped in `SecretString`
//! so it never shows up in `Debug` output or logs; it is only exposed when a
//! header is attached or the pair is persisted.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Access/refresh credential pair. Both halves are always present.
#[derive(Clone, Debug)]
pub struct TokenPair {
    access: SecretString,
    refresh: SecretString,
}

impl TokenPair {
    /// Returns `None` when either token is empty, so a half pair can't exist.
    #[must_use]
    pub fn from_parts(access: impl Into<String>, refresh: impl Into<String>) -> Option<Self> {
        let access = access.into();
        let refresh = refresh.into();
        if access.trim().is_empty() || refresh.trim().is_empty() {
            return None;
        }
        Some(Self {
            access: SecretString::from(access),
            refresh: SecretString::from(refresh),
        })
    }

    #[must_use]
    pub fn access(&self) -> &str {
        self.access.expose_secret()
    }

    #[must_use]
    pub fn refresh(&self) -> &str {
        self.refresh.expose_secret()
    }

    /// New pair with a rotated access token and the same refresh token.
    #[must_use]
    pub fn with_access(&self, access: impl Into<String>) -> Self {
        Self {
            access: SecretString::from(access.into()),
            refresh: self.refresh.clone(),
        }
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&StoredTokens {
            access: self.access().to_string(),
            refresh: self.refresh().to_string(),
        })
    }

    pub(crate) fn from_json(raw: &str) -> Option<Self> {
        let stored: StoredTokens = serde_json::from_str(raw).ok()?;
        Self::from_parts(stored.access, stored.refresh)
    }
}

/// On-disk shape of a token pair.
#[derive(Serialize, Deserialize)]
struct StoredTokens {
    access: String,
    refresh: String,
}

/// Role decided once from the profile endpoint's flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Officer,
    Citizen,
    #[serde(rename = "user")]
    Other,
}

impl Role {
    /// Officer wins when both flags are set.
    #[must_use]
    pub fn from_flags(is_officer: bool, is_citizen: bool) -> Self {
        if is_officer {
            Self::Officer
        } else if is_citizen {
            Self::Citizen
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Officer => "officer",
            Self::Citizen => "citizen",
            Self::Other => "user",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerDetails {
    #[serde(default)]
    pub gn_division: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenDetails {
    pub nic: String,
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gn_division: String,
}

/// Authenticated user as cached by the session store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer: Option<OfficerDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizen: Option<CitizenDetails>,
}

impl UserProfile {
    #[must_use]
    pub fn is_officer(&self) -> bool {
        self.role == Role::Officer
    }
}

/// `GET /api/me/` response.
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub username: String,
    #[serde(default)]
    pub is_officer: bool,
    #[serde(default)]
    pub is_citizen: bool,
    #[serde(default)]
    pub officer: Option<OfficerDetails>,
    #[serde(default)]
    pub citizen: Option<CitizenDetails>,
}

impl From<MeResponse> for UserProfile {
    fn from(me: MeResponse) -> Self {
        Self {
            role: Role::from_flags(me.is_officer, me.is_citizen),
            username: me.username,
            officer: me.officer,
            citizen: me.citizen,
        }
    }
}

/// `POST /api/auth/token/` body. Must never be logged.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

/// `POST /api/auth/token/refresh/` body.
#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
}
