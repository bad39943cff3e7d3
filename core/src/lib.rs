//! latu-core - Core types for the LATU span delivery toolkit
//!
//! This crate provides the foundational types shared between the LATU
//! reporter and external transport implementations:
//!
//! - [`SpanBatch`] - an ordered batch of encoded span records
//! - [`Encoding`] trait - frames records into one body, declares media type
//! - [`Transport`] trait - async interface for the actual POST
//! - [`TransportError`] - error type for transmission failures
//!
//! # Why this crate exists
//!
//! A custom transport (say, one speaking through a corporate proxy
//! library) needs the `Transport` trait and `SpanBatch`. Without
//! `latu-core` it would depend on `latu-reporter`, but `latu-reporter`
//! might also want to optionally depend on that transport, creating a
//! cyclic dependency. Extracting the seam types here breaks the cycle:
//!
//! ```text
//! latu-core ◄── latu-reporter
//!     ▲
//!     └───────── custom transports
//! ```

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(missing_docs)]

/// The unit of transmission
pub mod batch;
/// Encoding descriptors
pub mod encode;
mod error;
mod transport;

pub use batch::SpanBatch;
pub use encode::{Encoding, JsonEncoding};
pub use error::TransportError;
pub use transport::Transport;
