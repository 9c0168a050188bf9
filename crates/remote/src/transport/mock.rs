//! Scripted transport for tests.
//!
//! Responses are queued up front and handed out in order; every request that
//! reaches the transport is recorded. Clones share the same script and log,
//! so a test can keep one handle while the client owns another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::RemoteError;
use async_trait::async_trait;

type Script = VecDeque<Result<HttpResponse, RemoteError>>;

#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a failure that produces no response at all.
    pub fn fail(self, error: RemoteError) -> Self {
        self.push(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, entry: Result<HttpResponse, RemoteError>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(entry);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(RemoteError::transport(format!(
                    "no scripted response for '{}'",
                    url
                )))
            })
    }

    fn transport_id(&self) -> &str {
        "mock"
    }
}
