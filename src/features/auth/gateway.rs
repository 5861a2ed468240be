//! Authenticated request gateway.
//!
//! Every protected call goes through [`execute`]: the current access token is
//! attached as a bearer header, and a `401` triggers exactly one refresh and one
//! resend. If the refresh fails the session is logged out and the caller sees the
//! original `401`. Credential endpoints never come through here.

use crate::{
    app_lib::{
        AppError,
        api::{build_url, error_from_response, handle_json_response, map_request_error},
    },
    features::auth::state::SessionStore,
};
use reqwest::{Method, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info_span, warn};

/// A protected request. Cloned for the single resend after a refresh.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    retried: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// # Errors
    /// Returns an error if the body cannot be encoded as JSON.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, AppError> {
        let value = serde_json::to_value(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this request is already the resend after a refresh.
    #[must_use]
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    fn into_retry(mut self) -> Self {
        self.retried = true;
        self
    }
}

/// Cheap, cloneable handle for issuing protected calls against a session.
#[derive(Clone, Debug)]
pub struct Gateway {
    session: Arc<SessionStore>,
}

impl Gateway {
    #[must_use]
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// # Errors
    /// Returns the transport or HTTP error left after refresh handling.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, AppError> {
        execute(&self.session, request).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(ApiRequest::get(path)).await?;
        handle_json_response(response).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |request, (key, value)| {
                request.with_query(*key, *value)
            });
        let response = self.send(request).await?;
        handle_json_response(response).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(ApiRequest::post(path).with_json(body)?).await?;
        handle_json_response(response).await
    }
}

/// Sends `request` with the session's bearer token, refreshing once on `401`.
pub(crate) async fn execute(
    session: &SessionStore,
    request: ApiRequest,
) -> Result<Response, AppError> {
    let sent_with = session.tokens().map(|tokens| tokens.access().to_string());
    let response = dispatch(session, &request, sent_with.as_deref()).await?;

    if response.status() != StatusCode::UNAUTHORIZED {
        return ensure_success(response).await;
    }

    let original = error_from_response(response).await;

    if request.is_retried() {
        debug!(path = %request.path, "retry rejected; not refreshing again");
        return Err(original);
    }

    if session.tokens().is_none() {
        debug!(path = %request.path, "no refresh token; propagating 401");
        return Err(original);
    }

    let access = match session.refresh_after(sent_with.as_deref()).await {
        Ok(access) => access,
        Err(err) => {
            warn!("Token refresh failed, signing out: {}", err);
            if let Err(err) = session.logout() {
                error!("Failed to clear session after refresh failure: {}", err);
            }
            return Err(original);
        }
    };

    let retry = request.into_retry();
    let response = dispatch(session, &retry, Some(&access)).await?;
    ensure_success(response).await
}

async fn dispatch(
    session: &SessionStore,
    request: &ApiRequest,
    access: Option<&str>,
) -> Result<Response, AppError> {
    let url = build_url(&session.config().api_base_url, &request.path);
    let span = info_span!(
        "gateway.request",
        http.method = %request.method,
        url = %url,
        retried = request.retried
    );

    let mut builder = session.http().request(request.method.clone(), &url);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }
    if let Some(token) = access {
        builder = builder.bearer_auth(token);
    }

    builder
        .send()
        .instrument(span)
        .await
        .map_err(|err| map_request_error(&err))
}

async fn ensure_success(response: Response) -> Result<Response, AppError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_lib::AppConfig,
        features::auth::{
            client::REFRESH_PATH,
            storage::{MemoryStorage, SessionStorage, TOKENS_KEY},
        },
    };
    use anyhow::{Context, Result, anyhow};
    use serde_json::json;
    use std::{net::TcpListener, time::Duration};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const EMERGENCIES: &str = "/api/complaints/emergencies/";

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn gateway_for(
        server: &MockServer,
        storage: &Arc<MemoryStorage>,
        tokens: Option<(&str, &str)>,
    ) -> Result<Gateway> {
        if let Some((access, refresh)) = tokens {
            storage.store(
                TOKENS_KEY,
                &json!({"access": access, "refresh": refresh}).to_string(),
            )?;
        }
        let storage: Arc<dyn SessionStorage> = storage.clone();
        let session = SessionStore::open(AppConfig::new(server.uri()), storage)?;
        Ok(Gateway::new(Arc::new(session)))
    }

    #[tokio::test]
    async fn attaches_bearer_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .and(header("Authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let body: Value = gateway.get_json(EMERGENCIES).await?;
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn sends_unauthenticated_without_header() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/complaints/"))
            .and(|req: &Request| !req.headers.contains_key("authorization"))
            .and(body_json(json!({"title": "Broken streetlight"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, None)?;
        let body: Value = gateway
            .post_json("/api/complaints/", &json!({"title": "Broken streetlight"}))
            .await?;
        assert_eq!(body["id"], 7);
        Ok(())
    }

    #[tokio::test]
    async fn forwards_query_parameters() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/complaints/by-status"))
            .and(query_param("status", "IN_PROGRESS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let body: Value = gateway
            .get_json_with_query("/api/complaints/by-status", &[("status", "IN_PROGRESS")])
            .await?;
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn refreshes_once_and_resends() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .and(header("Authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .and(body_json(json!({"refresh": "R1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .and(header("Authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let body: Value = gateway.get_json(EMERGENCIES).await?;
        assert_eq!(body, json!([{"id": 1}]));

        let tokens = gateway.session().tokens().context("tokens")?;
        assert_eq!(tokens.access(), "A2");
        assert_eq!(tokens.refresh(), "R1");

        let stored = storage.load(TOKENS_KEY)?.context("stored tokens")?;
        let stored: Value = serde_json::from_str(&stored)?;
        assert_eq!(stored, json!({"access": "A2", "refresh": "R1"}));
        Ok(())
    }

    #[tokio::test]
    async fn second_unauthorized_is_final() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let err = gateway
            .send(ApiRequest::get(EMERGENCIES))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.is_unauthorized());
        // The refreshed session is kept; only a failed refresh logs out.
        assert!(gateway.session().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_logs_out_and_returns_original_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Token is invalid or expired"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let err = gateway
            .send(ApiRequest::get(EMERGENCIES))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;

        assert_eq!(
            err,
            AppError::Http {
                status: 401,
                message: "Token expired".to_string()
            }
        );
        assert!(!gateway.session().is_authenticated());
        assert!(storage.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn no_session_means_no_refresh() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(0)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, None)?;
        let result = gateway.send(ApiRequest::get(EMERGENCIES)).await;
        assert_eq!(result.err().and_then(|err| err.status()), Some(401));
        Ok(())
    }

    #[tokio::test]
    async fn non_auth_failures_pass_through() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "detail": "You do not have permission to perform this action."
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(0)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let err = gateway
            .send(ApiRequest::get(EMERGENCIES))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert_eq!(err.status(), Some(403));
        assert!(gateway.session().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_unauthorized_share_one_refresh() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .and(header("Authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(100)))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(EMERGENCIES))
            .and(header("Authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let gateway = gateway_for(&server, &storage, Some(("A1", "R1")))?;
        let (first, second) = tokio::join!(
            gateway.get_json::<Value>(EMERGENCIES),
            gateway.get_json::<Value>(EMERGENCIES)
        );
        assert_eq!(first?, json!([]));
        assert_eq!(second?, json!([]));
        Ok(())
    }

    #[test]
    fn retry_marker() {
        let request = ApiRequest::get(EMERGENCIES).with_query("status", "PENDING");
        assert!(!request.is_retried());
        assert_eq!(request.path(), EMERGENCIES);
        assert!(request.into_retry().is_retried());
    }
}
