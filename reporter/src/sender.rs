//! HTTP span sender with threshold compression
//!
//! The sender frames a [`SpanBatch`] into one body via its [`Encoding`],
//! attaches the protocol headers, gzips the body when it is large enough
//! to be worth it, and hands the result to the [`Transport`].

use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use latu_core::{Encoding, SpanBatch, Transport, TransportError};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Only gzip bodies bigger than this many bytes
///
/// Compared against the uncompressed body length with strict `>`, so a
/// body of exactly this size is posted uncompressed.
pub const COMPRESSION_THRESHOLD_BYTES: usize = 1024;

/// Sends span batches to a collector endpoint over HTTP
///
/// Stateless per call apart from counters; a sender behind an `Arc` is
/// safe to share across tasks. Failures from the transport propagate
/// unchanged - retry policy belongs to the caller.
pub struct HttpSender {
    endpoint: Url,
    encoding: Arc<dyn Encoding>,
    transport: Arc<dyn Transport>,
    /// Count of spans successfully posted
    sent_spans: AtomicU64,
    /// Count of body bytes handed to the transport (post-compression)
    sent_bytes: AtomicU64,
}

impl HttpSender {
    /// Create a sender for one collector endpoint
    pub fn new(endpoint: Url, encoding: Arc<dyn Encoding>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            encoding,
            transport,
            sent_spans: AtomicU64::new(0),
            sent_bytes: AtomicU64::new(0),
        }
    }

    /// The collector endpoint this sender posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Total spans successfully posted
    pub fn sent_spans(&self) -> u64 {
        self.sent_spans.load(Ordering::Relaxed)
    }

    /// Total body bytes handed to the transport
    pub fn sent_bytes(&self) -> u64 {
        self.sent_bytes.load(Ordering::Relaxed)
    }

    /// Frame the batch records into one transmittable body
    pub fn build_body(&self, batch: &SpanBatch) -> Bytes {
        self.encoding.encode(batch.records())
    }

    /// Send one batch to the collector
    ///
    /// Consumes the batch: it is discarded after transmission or failure.
    /// Steps:
    ///
    /// 1. frame the records via the encoding
    /// 2. attach the `b3: 0` marker and `Content-Type` headers
    /// 3. gzip the body when it exceeds [`COMPRESSION_THRESHOLD_BYTES`],
    ///    adding `Content-Encoding: gzip`
    /// 4. POST via the transport; any [`TransportError`] propagates
    ///    unchanged, no retries
    pub async fn send(&self, batch: SpanBatch) -> Result<(), TransportError> {
        let span_count = batch.len();
        let mut body = self.build_body(&batch);
        let mut headers = self.default_headers();

        if needs_compression(&body) {
            let uncompressed = body.len();
            body = compress(&body)?;
            headers.insert("Content-Encoding".to_string(), "gzip".to_string());
            debug!(
                transport = self.transport.name(),
                uncompressed,
                compressed = body.len(),
                "compressing span batch"
            );
        }

        let body_len = body.len() as u64;
        self.transport
            .post_spans(&self.endpoint, &headers, body)
            .await?;

        self.sent_spans
            .fetch_add(span_count as u64, Ordering::Relaxed);
        self.sent_bytes.fetch_add(body_len, Ordering::Relaxed);
        debug!(
            transport = self.transport.name(),
            spans = span_count,
            bytes = body_len,
            "span batch posted"
        );
        Ok(())
    }

    /// Headers attached to every POST
    ///
    /// `b3: 0` tells tracing-aware proxies not to trace the report
    /// request itself; `Content-Type` comes from the encoding.
    fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("b3".to_string(), "0".to_string());
        headers.insert(
            "Content-Type".to_string(),
            self.encoding.media_type().to_string(),
        );
        headers
    }
}

fn needs_compression(body: &Bytes) -> bool {
    body.len() > COMPRESSION_THRESHOLD_BYTES
}

fn compress(input: &[u8]) -> Result<Bytes, TransportError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(input)
        .and_then(|_| encoder.finish())
        .map(Bytes::from)
        .map_err(|e| TransportError::Body(format!("gzip compression failed: {}", e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flate2::read::GzDecoder;
    use latu_core::JsonEncoding;
    use parking_lot::Mutex;
    use std::io::Read;

    /// One captured POST
    #[derive(Clone)]
    struct Posted {
        headers: HashMap<String, String>,
        body: Bytes,
    }

    /// Mock transport that records every POST
    struct MockTransport {
        posts: Mutex<Vec<Posted>>,
        fail_with: Option<TransportError>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(error: TransportError) -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
                fail_with: Some(error),
            }
        }

        fn posts(&self) -> Vec<Posted> {
            self.posts.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn post_spans(
            &self,
            _endpoint: &Url,
            headers: &HashMap<String, String>,
            body: Bytes,
        ) -> Result<(), TransportError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.posts.lock().push(Posted {
                headers: headers.clone(),
                body,
            });
            Ok(())
        }
    }

    fn make_sender(transport: Arc<MockTransport>) -> HttpSender {
        HttpSender::new(
            Url::parse("http://localhost:9411/api/v2/spans").unwrap(),
            Arc::new(JsonEncoding::new()),
            transport,
        )
    }

    /// A batch of one record whose framed JSON body is exactly `body_len`
    /// bytes: `[` + record + `]`
    fn batch_with_body_len(body_len: usize) -> SpanBatch {
        SpanBatch::from_records(vec![Bytes::from(vec![b'x'; body_len - 2])])
    }

    fn gunzip(body: &[u8]) -> Vec<u8> {
        let mut decoder = GzDecoder::new(body);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    // ========================================================================
    // Headers
    // ========================================================================

    #[tokio::test]
    async fn default_headers_attached() {
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());

        sender
            .send(SpanBatch::from_records(vec![Bytes::from_static(b"{}")]))
            .await
            .unwrap();

        let posts = transport.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].headers.get("b3"), Some(&"0".to_string()));
        assert_eq!(
            posts[0].headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    // ========================================================================
    // Compression threshold
    // ========================================================================

    #[tokio::test]
    async fn body_at_threshold_not_compressed() {
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());
        let batch = batch_with_body_len(COMPRESSION_THRESHOLD_BYTES);

        sender.send(batch).await.unwrap();

        let posts = transport.posts();
        assert_eq!(posts[0].body.len(), COMPRESSION_THRESHOLD_BYTES);
        assert!(
            !posts[0].headers.contains_key("Content-Encoding"),
            "1024-byte body must be posted uncompressed"
        );
    }

    #[tokio::test]
    async fn body_above_threshold_compressed() {
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());
        let batch = batch_with_body_len(COMPRESSION_THRESHOLD_BYTES + 1);
        let expected = sender.build_body(&batch);

        sender.send(batch).await.unwrap();

        let posts = transport.posts();
        assert_eq!(
            posts[0].headers.get("Content-Encoding"),
            Some(&"gzip".to_string())
        );
        assert!(posts[0].body.len() < COMPRESSION_THRESHOLD_BYTES + 1);
        assert_eq!(
            gunzip(&posts[0].body),
            expected.as_ref(),
            "decompressed body must equal the original"
        );
    }

    #[tokio::test]
    async fn threshold_uses_uncompressed_length() {
        // A highly compressible 2KB body still triggers compression even
        // though its compressed form is tiny
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());

        sender.send(batch_with_body_len(2048)).await.unwrap();

        let posts = transport.posts();
        assert!(posts[0].headers.contains_key("Content-Encoding"));
    }

    // ========================================================================
    // Error propagation and counters
    // ========================================================================

    #[tokio::test]
    async fn transport_error_propagates_unchanged() {
        let transport = Arc::new(MockTransport::failing(TransportError::Status {
            code: 503,
            message: "unavailable".to_string(),
        }));
        let sender = make_sender(transport.clone());

        let result = sender
            .send(SpanBatch::from_records(vec![Bytes::from_static(b"{}")]))
            .await;

        assert_eq!(
            result,
            Err(TransportError::Status {
                code: 503,
                message: "unavailable".to_string(),
            })
        );
        assert_eq!(sender.sent_spans(), 0, "no partial state after a failure");
        assert_eq!(sender.sent_bytes(), 0);
    }

    #[tokio::test]
    async fn counters_track_successful_sends() {
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());

        sender
            .send(SpanBatch::from_records(vec![
                Bytes::from_static(b"{}"),
                Bytes::from_static(b"{}"),
                Bytes::from_static(b"{}"),
            ]))
            .await
            .unwrap();

        assert_eq!(sender.sent_spans(), 3);
        let posted_len = transport.posts()[0].body.len() as u64;
        assert_eq!(sender.sent_bytes(), posted_len);
    }

    #[tokio::test]
    async fn empty_batch_posts_empty_list() {
        let transport = Arc::new(MockTransport::new());
        let sender = make_sender(transport.clone());

        sender.send(SpanBatch::new()).await.unwrap();

        assert_eq!(transport.posts()[0].body.as_ref(), b"[]");
    }
}
