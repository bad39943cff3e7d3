//! Span batch - the unit of transmission
//!
//! A [`SpanBatch`] groups the encoded span records queued for one flush
//! cycle. Records are opaque to the batch: each is already encoded by the
//! instrumentation (e.g. a JSON span object) and only framed into a single
//! body at send time by an [`Encoding`](crate::Encoding).
//!
//! Batches are consumed exactly once: `HttpSender::send` takes the batch
//! by value and it is discarded after transmission or failure.

use bytes::Bytes;

/// An ordered batch of encoded span records
///
/// Payloads use [`Bytes`] so a record handed to multiple places only
/// bumps a refcount instead of copying.
#[derive(Debug, Clone, Default)]
pub struct SpanBatch {
    records: Vec<Bytes>,
}

impl SpanBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a batch from pre-encoded records
    pub fn from_records(records: Vec<Bytes>) -> Self {
        Self { records }
    }

    /// Append a record to the batch
    pub fn push(&mut self, record: impl Into<Bytes>) {
        self.records.push(record.into());
    }

    /// The records in insertion order
    pub fn records(&self) -> &[Bytes] {
        &self.records
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of record sizes in bytes, before framing
    ///
    /// This is not the size of the transmitted body - framing adds
    /// delimiters and compression may shrink it.
    pub fn total_bytes(&self) -> usize {
        self.records.iter().map(Bytes::len).sum()
    }
}
