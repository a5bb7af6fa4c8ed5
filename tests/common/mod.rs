#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::GzDecoder;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webmap::common::Result;
use webmap::server::{Config, Credentials, IntegrationRegistry, WebMap};
use webmap::upload::{HttpMethod, Request, Transport};

pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Keeps every request together with the exact bytes that went over the wire
#[derive(Default)]
pub struct CapturingTransport {
    captured: Mutex<Vec<(Request, Option<Vec<u8>>)>>,
}

impl CapturingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .filter(|(request, _)| request.method == method)
            .count()
    }

    /// Every packet of every batch body, decoded from the gzipped JSON
    pub fn packets(&self) -> Vec<Value> {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, body)| body.as_deref())
            .flat_map(|body| {
                let batch: Vec<Value> = serde_json::from_reader(GzDecoder::new(body)).unwrap();
                batch
            })
            .collect()
    }
}

impl Transport for CapturingTransport {
    fn send(&self, request: &Request, body: Option<&[u8]>) -> Result<String> {
        self.captured
            .lock()
            .unwrap()
            .push((request.clone(), body.map(<[u8]>::to_vec)));
        Ok(String::new())
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        identifier: "7".to_owned(),
        token: "hunter2".to_owned(),
    }
}

pub fn create_map(config: Config, transport: Arc<CapturingTransport>) -> Arc<WebMap> {
    let map = WebMap::new(config, transport, IntegrationRegistry::empty()).unwrap();
    map.set_credentials(Some(credentials()));
    map
}

pub fn image_of(packet: &Value) -> Vec<u8> {
    BASE64.decode(packet["data"].as_str().unwrap()).unwrap()
}

pub fn find_packet(packets: &[Value], x: i64, z: i64) -> &Value {
    packets
        .iter()
        .find(|packet| packet["x"] == x && packet["z"] == z)
        .unwrap_or_else(|| panic!("no packet for unit {},{}", x, z))
}
