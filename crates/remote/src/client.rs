//! Client bundling a transport with the remote store's configuration.
//!
//! The order and product actions are implemented as methods on
//! [`ShopClient`] in [`crate::orders`] and [`crate::products`].

use crate::config::{redact, RemoteConfig};
use crate::error::RemoteError;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub struct ShopClient {
    transport: Box<dyn Transport>,
    config: RemoteConfig,
}

impl ShopClient {
    pub fn new(transport: Box<dyn Transport>, config: RemoteConfig) -> Self {
        ShopClient { transport, config }
    }

    /// Client using the network transport.
    pub fn http(config: RemoteConfig) -> Self {
        Self::new(Box::new(crate::transport::http::HttpTransport::new()), config)
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Send `request`; a non-success status becomes
    /// [`RemoteError::RemoteRequest`].
    pub(crate) async fn call(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let method = request.method.as_str();
        let url = redact(&request.url).to_string();
        tracing::debug!(
            method,
            url = %url,
            transport = self.transport.transport_id(),
            "sending request"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method, url = %url, error = %e, "request failed");
            e
        })?;

        if !response.is_success() {
            tracing::warn!(method, url = %url, status = response.status, "remote store rejected request");
            return Err(RemoteError::RemoteRequest {
                status: response.status,
            });
        }

        tracing::debug!(method, url = %url, status = response.status, "response received");
        Ok(response)
    }
}
