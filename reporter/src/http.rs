//! Concrete HTTP transport over reqwest
//!
//! Maps reqwest failure modes onto the [`TransportError`] taxonomy. The
//! response body is never consumed; only the status matters.

use async_trait::async_trait;
use bytes::Bytes;
use latu_core::{Transport, TransportError};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default connect timeout for collector endpoints
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default request timeout for collector endpoints
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP transport backed by a shared reqwest client
///
/// The client pools connections, so one transport should be reused for
/// the lifetime of the reporter.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeouts
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Create a transport with explicit connect and request timeouts
    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()
            .map_err(|e| TransportError::Connection(format!("failed to build client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn post_spans(
        &self,
        endpoint: &Url,
        headers: &HashMap<String, String>,
        body: Bytes,
    ) -> Result<(), TransportError> {
        let mut request = self.client.post(endpoint.clone()).body(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Connection(format!(
                    "failed to POST to {}: {}",
                    endpoint, e
                ))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("collector rejected spans")
                    .to_string(),
            });
        }

        debug!(endpoint = %endpoint, status = status.as_u16(), "spans accepted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_timeouts() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn builds_with_custom_timeouts() {
        let transport =
            HttpTransport::with_timeouts(Duration::from_millis(100), Duration::from_millis(200));
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn connection_refused_maps_to_connection_error() {
        // Nothing listens on this port
        let transport = HttpTransport::new().unwrap();
        let endpoint = Url::parse("http://127.0.0.1:59996/api/v2/spans").unwrap();

        let result = transport
            .post_spans(&endpoint, &HashMap::new(), Bytes::from_static(b"[]"))
            .await;

        match result {
            Err(TransportError::Connection(msg)) => {
                assert!(msg.contains("127.0.0.1:59996"));
            }
            other => panic!("Expected Connection error, got: {:?}", other),
        }
    }
}
