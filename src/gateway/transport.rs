use async_trait::async_trait;

use crate::error::Result;

/// A fully built HTTP request, ready to be put on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub uri: String,
    /// Header name/value pairs in the order they were added
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl OutboundRequest {
    /// Returns the first value of the named header, matching names case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of the provider's reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends requests to the provider.
///
/// Network failures are reported as `Error::Transport`. A non-2xx status is not
/// an error at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse>;
}

#[cfg(feature = "transport-reqwest")]
pub use reqwest_transport::*;

#[cfg(feature = "transport-reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{OutboundRequest, Transport, TransportResponse};
    use crate::error::{Error, Result};

    /// [`Transport`] backed by a shared `reqwest::Client`.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Builds the HTTPS client used for every identity check.
        ///
        /// # Arguments
        ///
        /// * `connect_timeout` - Limit on connection establishment, shared by all calls.
        /// * `client_identity_pem` - PEM encoded client certificate and private key for mutual TLS.
        pub fn new(connect_timeout: Duration, client_identity_pem: Option<&[u8]>) -> Result<Self> {
            let mut builder = reqwest::Client::builder().connect_timeout(connect_timeout);

            if let Some(pem) = client_identity_pem {
                log::info!("Configuring client TLS identity");
                let identity = reqwest::Identity::from_pem(pem)
                    .map_err(|e| Error::Config(format!("Invalid client identity: {e}")))?;
                builder = builder.identity(identity);
            }

            let client = builder
                .build()
                .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

            Ok(ReqwestTransport { client })
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
            let method = reqwest::Method::from_bytes(request.method.as_bytes())
                .map_err(|e| Error::InvalidArgument(format!("Invalid HTTP method: {e}")))?;

            let mut builder = self.client.request(method, &request.uri);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            log::trace!("Sending {} {}", request.method, request.uri);

            let response = builder
                .body(request.body)
                .send()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            log::debug!("Response status: {status}, {} bytes", body.len());

            Ok(TransportResponse {
                status: status.as_u16(),
                body,
            })
        }
    }
}
