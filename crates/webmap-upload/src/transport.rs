use crate::request::Request;
use webmap_common::Result;
use webmap_logger::log;
use webmap_logger::LogSeverity::Debug;

/// Performs a request against the map service and returns the response body.
///
/// `body` is the request's compressed body, already encoded by the caller so that its size can
/// be accounted for; implementations send it with `Content-Encoding: gzip`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request, body: Option<&[u8]>) -> Result<String>;
}

/// Dry-run transport that only logs what would have been sent
pub struct LogTransport {
    base_url: String,
}

impl LogTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Transport for LogTransport {
    fn send(&self, request: &Request, body: Option<&[u8]>) -> Result<String> {
        let packets = request.body.as_ref().map_or(0, Vec::len);
        log(
            format!(
                "{} {} ({} packets, {} bytes)",
                request.method,
                request.url(&self.base_url),
                packets,
                body.map_or(0, <[u8]>::len)
            ),
            Debug,
        );
        Ok(String::new())
    }
}
