//! Transport trait for LATU senders
//!
//! The [`Transport`] trait is the seam between the sender and the actual
//! network client. The sender builds the body and headers; the transport
//! performs the POST.

use crate::error::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use url::Url;

/// Transport - performs the actual HTTP POST to the collector
///
/// This is an injected capability rather than a subclass hook: a sender
/// is constructed with the one transport it will use, and tests supply a
/// mock. Timeout and cancellation policy live inside the transport.
///
/// # Implementation Requirements
///
/// - Transports must be `Send + Sync` for use across async tasks
/// - Any I/O failure maps onto [`TransportError`]; the sender propagates
///   it unchanged and never retries
/// - The collector's response body is not consumed
///
/// # Example
///
/// ```ignore
/// use latu_core::{Transport, TransportError};
/// use async_trait::async_trait;
/// use bytes::Bytes;
/// use std::collections::HashMap;
/// use url::Url;
///
/// struct ReqwestTransport {
///     client: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl Transport for ReqwestTransport {
///     fn name(&self) -> &'static str {
///         "reqwest"
///     }
///
///     async fn post_spans(
///         &self,
///         endpoint: &Url,
///         headers: &HashMap<String, String>,
///         body: Bytes,
///     ) -> Result<(), TransportError> {
///         let mut request = self.client.post(endpoint.clone()).body(body);
///         for (name, value) in headers {
///             request = request.header(name, value);
///         }
///         let response = request
///             .send()
///             .await
///             .map_err(|e| TransportError::Connection(e.to_string()))?;
///         if !response.status().is_success() {
///             return Err(TransportError::Status {
///                 code: response.status().as_u16(),
///                 message: "post rejected".to_string(),
///             });
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the transport's name for identification and logging
    ///
    /// Short and descriptive. Examples: "reqwest", "mock", "unix-socket".
    fn name(&self) -> &'static str;

    /// POST one framed body to the collector endpoint
    ///
    /// # Arguments
    ///
    /// * `endpoint` - collector URL to POST to
    /// * `headers` - header name/value pairs to attach verbatim
    /// * `body` - the framed (possibly compressed) batch body
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the collector accepted the request
    /// * `Err(TransportError)` - connection failure, non-2xx status, or
    ///   timeout
    async fn post_spans(
        &self,
        endpoint: &Url,
        headers: &HashMap<String, String>,
        body: Bytes,
    ) -> Result<(), TransportError>;

    /// Graceful shutdown
    ///
    /// Called when the owning reporter is shutting down. The default
    /// implementation returns `Ok(())` for transports with nothing to
    /// release.
    async fn shutdown(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
