//! HTTP transport backed by `ureq`.
//!
//! `ureq` is synchronous, so each request runs inside
//! `tokio::task::spawn_blocking` to keep the async runtime free. The agent is
//! configured to hand back 4xx/5xx responses instead of turning them into
//! errors.

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::RemoteError;
use async_trait::async_trait;

/// Transport that talks to the remote store over the network.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        HttpTransport { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn execute(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let body = request.body.clone().unwrap_or(serde_json::Value::Null);
    let response = match request.method {
        Method::Get => agent.get(&request.url).call()?,
        Method::Post => agent.post(&request.url).send_json(&body)?,
        Method::Patch => agent.patch(&request.url).send_json(&body)?,
    };
    let status = response.status().as_u16();
    let body = response.into_body().read_to_string()?;
    Ok(HttpResponse { status, body })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, &request))
            .await
            .map_err(|e| RemoteError::transport(format!("task join error: {}", e)))?
            .map_err(RemoteError::transport)
    }

    fn transport_id(&self) -> &str {
        "http"
    }
}
