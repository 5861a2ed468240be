//! Raw calls to the credential endpoints. These never go through the gateway:
//! a `401` from the token or refresh endpoint is a final answer, not a reason to
//! refresh. None of these helpers touch session state.

use crate::{
    app_lib::{
        AppError,
        api::{build_url, error_from_response, handle_json_response, map_request_error},
    },
    features::auth::types::{
        RefreshRequest, RefreshResponse, TokenPair, TokenRequest, TokenResponse,
    },
};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, debug, info_span};

pub const TOKEN_PATH: &str = "/api/auth/token/";
pub const REFRESH_PATH: &str = "/api/auth/token/refresh/";
pub const ME_PATH: &str = "/api/me/";

const INVALID_CREDENTIALS: &str = "Invalid credentials or not an Officer.";

/// Exchanges a username and password for a token pair.
/// # Errors
/// Returns `InvalidCredentials` when the backend rejects the credentials, or a
/// transport/parse error otherwise.
pub async fn obtain_token(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &SecretString,
) -> Result<TokenPair, AppError> {
    let url = build_url(base_url, TOKEN_PATH);
    let span = info_span!("auth.obtain_token", http.method = "POST", url = %url);

    let response = client
        .post(&url)
        .json(&TokenRequest {
            username,
            password: password.expose_secret(),
        })
        .send()
        .instrument(span)
        .await
        .map_err(|err| map_request_error(&err))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
        let message = match error_from_response(response).await {
            AppError::Http { message, .. } if message != "Request failed." => message,
            _ => INVALID_CREDENTIALS.to_string(),
        };
        debug!(status = status.as_u16(), "credentials rejected");
        return Err(AppError::InvalidCredentials(message));
    }

    let tokens: TokenResponse = handle_json_response(response).await?;
    TokenPair::from_parts(tokens.access, tokens.refresh).ok_or_else(|| {
        AppError::Parse("Token response is missing the access or refresh token.".to_string())
    })
}

/// Exchanges a refresh token for a new access token.
/// # Errors
/// Returns an error if the refresh token is rejected or the response is malformed.
pub async fn refresh_access(
    client: &Client,
    base_url: &str,
    refresh: &str,
) -> Result<String, AppError> {
    let url = build_url(base_url, REFRESH_PATH);
    let span = info_span!("auth.refresh_access", http.method = "POST", url = %url);

    let response = client
        .post(&url)
        .json(&RefreshRequest { refresh })
        .send()
        .instrument(span)
        .await
        .map_err(|err| map_request_error(&err))?;

    let body: RefreshResponse = handle_json_response(response).await?;
    if body.access.trim().is_empty() {
        return Err(AppError::Parse(
            "Refresh response is missing the access token.".to_string(),
        ));
    }

    Ok(body.access)
}
