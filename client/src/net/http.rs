//! HTTP client wrapper over the Buddie backend.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` owns the backend origin, a `Transport` that performs the
//! exchange, and an optional `AuthFailureHandler` supplied by the application
//! at startup. Every completed exchange passes through the response
//! interceptor before the caller sees it.
//!
//! Client-side (hydrate): `BrowserTransport` sends through `gloo-net` with
//! credentials included so the session cookie rides along.
//! Server-side (SSR): `BrowserTransport` answers `ApiError::Unavailable`.
//!
//! ERROR HANDLING
//! ==============
//! A 401/403 on any path other than the auth endpoints is escalated to the
//! handler (clear identity, navigate to sign-in, notify) and is still returned
//! to the caller as an error. Without a handler the escalation is skipped and
//! logged; the caller still gets the rejection.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Credential check endpoint.
pub const LOGIN_PATH: &str = "/login";
/// Session teardown endpoint.
pub const LOGOUT_PATH: &str = "/logout";
/// Identity check used to establish the session on mount.
pub const IDENTITY_PATH: &str = "/api/user/logged";
/// Identity check path seen in older views; kept for reference only.
pub const LEGACY_IDENTITY_PATH: &str = "/user/logado";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    Binary { content_type: String, bytes: Vec<u8> },
}

/// A backend request described independently of the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the backend origin, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: Body::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body = Body::Form(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn binary(mut self, content_type: &str, bytes: Vec<u8>) -> Self {
        self.body = Body::Binary { content_type: content_type.to_owned(), bytes };
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `value` cannot be serialized.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    /// Path with the encoded query string appended.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, encode_pairs(&self.query))
        }
    }
}

/// Percent-encode `key=value` pairs joined by `&`.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// A completed exchange as seen by the interceptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Performs one HTTP exchange.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Send `request` to the absolute `url` and collect status + body.
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Application-side reaction to a rejected session.
pub trait AuthFailureHandler: Send + Sync {
    fn on_auth_failure(&self);
}

/// Whether `path` is one of the endpoints that must never trigger a forced
/// logout: the login and logout endpoints themselves, plus the identity
/// check, whose 401 just means nobody is signed in.
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    path == LOGIN_PATH || path == LOGOUT_PATH || path == IDENTITY_PATH
}

/// Whether a failed exchange should force the session out.
pub fn should_escalate(status: u16, path: &str) -> bool {
    matches!(status, 401 | 403) && !is_auth_endpoint(path)
}

// =============================================================================
// CLIENT
// =============================================================================

/// Configured backend client shared by every view.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    on_auth_failure: Option<Arc<dyn AuthFailureHandler>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("has_auth_failure_handler", &self.on_auth_failure.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport, on_auth_failure: None }
    }

    /// Client that talks to the backend through the browser's fetch API.
    pub fn browser(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(BrowserTransport))
    }

    /// Install the session controller. Must happen before the first request
    /// whose auth failure should log the user out.
    #[must_use]
    pub fn with_auth_failure_handler(mut self, handler: Arc<dyn AuthFailureHandler>) -> Self {
        self.on_auth_failure = Some(handler);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a backend path (used for `<img src>`).
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Send a request through the transport and the response interceptor.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or the status-mapped error for
    /// any non-2xx response.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.config.url(&request.path_and_query());
        let outcome = self.transport.execute(&url, &request).await;
        self.intercept(&request.path, outcome)
    }

    /// Send and decode a JSON response body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`], plus `ApiError::Decode` for a body of the
    /// wrong shape.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        decode_json(&response.body)
    }

    /// Send and ignore the response body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`].
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    fn intercept(&self, path: &str, outcome: Result<RawResponse, ApiError>) -> Result<RawResponse, ApiError> {
        let response = outcome?;
        if response.is_success() {
            return Ok(response);
        }

        if should_escalate(response.status, path) {
            match &self.on_auth_failure {
                Some(handler) => {
                    leptos::logging::warn!("session rejected: status={} path={path}", response.status);
                    handler.on_auth_failure();
                }
                None => {
                    leptos::logging::warn!(
                        "session rejected with no auth failure handler: status={} path={path}",
                        response.status
                    );
                }
            }
        }

        Err(ApiError::from_status(response.status, response.body))
    }
}

/// Decode a JSON body, mapping parse failures to `ApiError::Decode`.
///
/// # Errors
///
/// Returns `ApiError::Decode` when `body` is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `fetch`-backed transport that always includes credentials.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            execute_in_browser(url, request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn execute_in_browser(url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
    use gloo_net::http::Request;

    let transport_err = |e: gloo_net::Error| ApiError::Transport(e.to_string());

    let builder = match request.method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
    .credentials(web_sys::RequestCredentials::Include);

    let prepared = match &request.body {
        Body::Empty => builder.build(),
        Body::Json(value) => builder.json(value),
        Body::Form(pairs) => builder
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(encode_pairs(pairs)),
        Body::Binary { content_type, bytes } => builder
            .header("Content-Type", content_type)
            .body(js_sys::Uint8Array::from(bytes.as_slice())),
    }
    .map_err(transport_err)?;

    let response = prepared.send().await.map_err(transport_err)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_err)?;
    Ok(RawResponse { status, body })
}
