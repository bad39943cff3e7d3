//! Encoding descriptors - how records become one body
//!
//! An [`Encoding`] frames the records of a batch into a single
//! transmittable body and declares the media type the collector should
//! see. The sender never looks inside records; framing is entirely the
//! encoding's concern.

use bytes::{BufMut, Bytes, BytesMut};

/// Frames batch records into one body and declares its media type
///
/// Implementations must be `Send + Sync` so a sender can be shared
/// across tasks.
pub trait Encoding: Send + Sync {
    /// Media type string for the `Content-Type` header
    /// (e.g. `"application/json"`)
    fn media_type(&self) -> &'static str;

    /// Concatenate records into a single transmittable body
    ///
    /// Called once per send with the batch's records in order. An empty
    /// record list must still produce a valid (empty) body.
    fn encode(&self, records: &[Bytes]) -> Bytes;
}

/// JSON list encoding
///
/// Each record is expected to already be a serialized JSON value; the
/// body is the records joined into a JSON array at the byte level.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoding;

impl JsonEncoding {
    /// Create a JSON list encoding
    pub fn new() -> Self {
        Self
    }
}

impl Encoding for JsonEncoding {
    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, records: &[Bytes]) -> Bytes {
        // 2 for the brackets, one comma between each pair of records
        let payload: usize = records.iter().map(Bytes::len).sum();
        let mut body = BytesMut::with_capacity(payload + 2 + records.len().saturating_sub(1));

        body.put_u8(b'[');
        for (idx, record) in records.iter().enumerate() {
            if idx > 0 {
                body.put_u8(b',');
            }
            body.put_slice(record);
        }
        body.put_u8(b']');

        body.freeze()
    }
}
