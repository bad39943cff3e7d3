//! latu-reporter - Batching span delivery to an HTTP collector
//!
//! ```text
//! instrumentation ──► Reporter ──► buffer ──► HttpSender ──► Transport
//! ```
//!
//! The [`Reporter`] handle queues encoded span records; a background
//! [`ReporterRunner`] batches them and the [`HttpSender`] posts each
//! batch, gzip-compressing bodies over 1 KiB. The wire client is
//! pluggable via the [`Transport`] trait from `latu-core`; the built-in
//! [`HttpTransport`] uses reqwest.
//!
//! # Example
//!
//! ```ignore
//! use latu_core::JsonEncoding;
//! use latu_reporter::{build, HttpSender, HttpTransport, ReporterConfig};
//! use std::sync::Arc;
//! use url::Url;
//!
//! let sender = Arc::new(HttpSender::new(
//!     Url::parse("http://collector:9411/api/v2/spans")?,
//!     Arc::new(JsonEncoding::new()),
//!     Arc::new(HttpTransport::new()?),
//! ));
//! let (reporter, runner) = build(sender, ReporterConfig::default());
//! tokio::spawn(runner.run());
//!
//! reporter.report(span_json_bytes);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

pub mod http;
pub mod reporter;
pub mod sender;

// Re-export the seam types - transport implementations depend on
// latu-core directly
pub use latu_core::{Encoding, JsonEncoding, SpanBatch, Transport, TransportError};

pub use http::HttpTransport;
pub use reporter::{build, Reporter, ReporterConfig, ReporterRunner};
pub use sender::{HttpSender, COMPRESSION_THRESHOLD_BYTES};
