//! HTTP helpers shared by the raw auth client and the gateway: one place for the
//! user agent, the timeout policy, URL joining and error-body sanitizing.

use super::{config::AppConfig, errors::AppError};
use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Builds the shared HTTP client with the configured timeout.
pub(crate) fn http_client(config: &AppConfig) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(config.timeout)
        .build()
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))
}

/// Joins the API base URL and a path without doubling slashes.
pub(crate) fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
pub(crate) fn map_request_error(err: &reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Decodes a successful JSON response or surfaces the sanitized HTTP error.
pub(crate) async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Consumes a failed response into an `AppError::Http`.
pub(crate) async fn error_from_response(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: sanitize_body(&body),
    }
}

/// Trims and truncates error bodies; DRF `{"detail": ...}` bodies collapse to the detail.
pub(crate) fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Request failed.".to_string();
    }

    let detail = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_string));

    detail
        .as_deref()
        .unwrap_or(trimmed)
        .chars()
        .take(MAX_ERROR_CHARS)
        .collect()
}
