//! Error types for LATU transports

use thiserror::Error;

/// Error type for span transmission
///
/// This is the standard error type returned by every [`Transport`]
/// implementation and by [`HttpSender::send`]. It categorizes the ways a
/// batch can fail to reach the collector. Failures are propagated to the
/// caller unchanged; no retry happens at this layer.
///
/// Absent or empty inputs on the configuration side are never errors —
/// they are silently skipped contributions.
///
/// # Example
///
/// ```
/// use latu_core::TransportError;
///
/// fn post_to_collector() -> Result<(), TransportError> {
///     // Simulate a refused connection
///     Err(TransportError::Connection("refused".to_string()))
/// }
///
/// match post_to_collector() {
///     Ok(_) => println!("delivered"),
///     Err(TransportError::Connection(msg)) => println!("connection failed: {}", msg),
///     Err(e) => println!("other failure: {}", e),
/// }
/// ```
///
/// [`Transport`]: crate::Transport
/// [`HttpSender::send`]: https://docs.rs/latu-reporter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection failed
    ///
    /// Returned when the network connection to the collector cannot be
    /// established. Examples: DNS lookup failed, connection refused,
    /// TLS handshake error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Collector rejected the request
    ///
    /// Returned when the collector answered with a non-2xx status.
    /// The response body, if any, is not consumed.
    #[error("collector returned status {code}: {message}")]
    Status {
        /// HTTP status code from the collector
        code: u16,
        /// Short description of the rejection
        message: String,
    },

    /// Request timed out
    ///
    /// Returned when the transport's own deadline elapsed before the
    /// collector answered. Deadlines belong to the transport, not the
    /// sender.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Body construction failed
    ///
    /// Returned when framing or compressing the batch body fails.
    /// Example: an I/O error from the gzip encoder.
    #[error("body construction failed: {0}")]
    Body(String),

    /// Shutdown error
    ///
    /// Returned when a transport fails to release its resources.
    #[error("shutdown error: {0}")]
    Shutdown(String),
}
