//! Transport abstraction between the actions and the network.
//!
//! A [`Transport`] executes one [`HttpRequest`] and hands back the raw
//! [`HttpResponse`]. Non-success statuses are responses, not errors: the
//! actions decide what a status means. Only failures that leave no response
//! at all become [`RemoteError::Transport`].

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// HTTP verbs the actions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// A request to the remote store. Bodies are always JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        HttpRequest {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        HttpRequest {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn patch(url: impl Into<String>, body: serde_json::Value) -> Self {
        HttpRequest {
            method: Method::Patch,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RemoteError> {
        serde_json::from_str(&self.body).map_err(RemoteError::parse)
    }
}

/// Executes requests against the remote store.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return whatever the server answered.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError>;

    /// Returns this transport's identifier (e.g. "http", "mock").
    fn transport_id(&self) -> &str;
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
