//! In-memory transport and handler doubles for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::http::{ApiClient, ApiRequest, AuthFailureHandler, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::ApiError;

pub(crate) const TEST_ORIGIN: &str = "http://backend.test";

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    seen: Mutex<Vec<(String, ApiRequest)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_status(&self, status: u16, body: &str) {
        self.push(Ok(RawResponse { status, body: body.to_owned() }));
    }

    pub(crate) fn push_json(&self, value: &serde_json::Value) {
        self.push_status(200, &value.to_string());
    }

    pub(crate) fn push_error(&self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(&self, outcome: Result<RawResponse, ApiError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(u, _)| u.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url.to_owned(), request.clone()));
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Counts how many times the interceptor escalated.
#[derive(Default)]
pub(crate) struct CountingHandler {
    calls: AtomicUsize,
}

impl CountingHandler {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthFailureHandler for CountingHandler {
    fn on_auth_failure(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Client over `transport` without an auth failure handler.
pub(crate) fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(ClientConfig::with_origin(TEST_ORIGIN), transport.clone())
}

/// Client over `transport` escalating into a fresh `CountingHandler`.
pub(crate) fn client_with_handler(transport: &Arc<ScriptedTransport>) -> (ApiClient, Arc<CountingHandler>) {
    let handler = Arc::new(CountingHandler::default());
    let client = client(transport).with_auth_failure_handler(handler.clone());
    (client, handler)
}
