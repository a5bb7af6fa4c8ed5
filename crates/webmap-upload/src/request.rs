use crate::packet::Packet;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use webmap_common::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Description of one call to the map service. Serialization and the actual network I/O belong
/// to the [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    /// Path relative to the service base URL, without a leading slash
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<Vec<Packet>>,
}

impl Request {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_owned(), value.into());
        self
    }

    pub fn with_body(mut self, packets: Vec<Packet>) -> Self {
        self.body = Some(packets);
        self
    }

    /// Full URL with the query string appended, values form-encoded
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base, self.path);
        if !self.query.is_empty() {
            let query: Vec<String> = self
                .query
                .iter()
                .map(|(key, value)| format!("{}={}", key, form_encode(value)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    /// Body as gzip-compressed JSON, or `None` for body-less requests
    pub fn compressed_body(&self) -> Result<Option<Vec<u8>>> {
        let packets = match &self.body {
            Some(packets) => packets,
            None => return Ok(None),
        };

        let json = serde_json::to_vec(packets)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        Ok(Some(encoder.finish()?))
    }
}

/// `application/x-www-form-urlencoded` escaping: alphanumerics and `.-*_` pass through, space
/// becomes `+`, every other byte of the UTF-8 encoding becomes `%XX`.
pub fn form_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' | b'*' | b'_' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
