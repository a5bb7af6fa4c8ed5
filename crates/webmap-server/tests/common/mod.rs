#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::GzDecoder;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webmap_common::{Result, UnitPos, WebMapError};
use webmap_render::{ColumnSource, Heightmap, MapColor};
use webmap_server::{Config, Credentials, HostUnit, IntegrationRegistry, WebMap};
use webmap_upload::{HttpMethod, Packet, Request, Transport};

pub const OVERWORLD: &str = "minecraft:overworld";
pub const SERVER_ID: &str = "42";
pub const TOKEN: &str = "secret";
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block {
    Air,
    Grass,
    Stone,
    Water,
    Bedrock,
}

/// Flat grass unit, optionally flooded by a one block deep lake
pub struct TerrainUnit {
    pub pos: UnitPos,
    pub dimension: String,
    pub surface: i32,
    pub lake: bool,
    pub complete: bool,
    pub has_heightmap: bool,
    /// Sampling blows up inside the host accessor
    pub panics: bool,
}

impl TerrainUnit {
    pub fn grass(x: i32, z: i32) -> Self {
        Self {
            pos: UnitPos::new(x, z),
            dimension: OVERWORLD.to_owned(),
            surface: 64,
            lake: false,
            complete: true,
            has_heightmap: true,
            panics: false,
        }
    }

    pub fn lake(x: i32, z: i32) -> Self {
        Self {
            lake: true,
            ..Self::grass(x, z)
        }
    }

    pub fn in_dimension(mut self, dimension: &str) -> Self {
        self.dimension = dimension.to_owned();
        self
    }
}

impl ColumnSource for TerrainUnit {
    type Block = Block;

    fn unit(&self) -> UnitPos {
        self.pos
    }

    fn min_y(&self) -> i32 {
        -64
    }

    fn heightmap(&self) -> Option<Heightmap> {
        self.has_heightmap.then(|| Heightmap::flat(self.surface))
    }

    fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<Block> {
        if self.panics {
            panic!("unit {},{} is corrupted", self.pos.x, self.pos.z);
        }
        if y < self.min_y() {
            return Err(WebMapError::SamplingError(format!("y={} below floor", y)));
        }
        let block = if y >= self.surface {
            Block::Air
        } else if y == self.surface - 1 {
            if self.lake {
                Block::Water
            } else {
                Block::Grass
            }
        } else if y == self.min_y() {
            Block::Bedrock
        } else {
            Block::Stone
        };
        Ok(block)
    }

    fn map_color(&self, block: &Block, _x: i32, _y: i32, _z: i32) -> MapColor {
        match block {
            Block::Air => MapColor::CLEAR,
            Block::Grass => MapColor::PALE_GREEN,
            Block::Stone | Block::Bedrock => MapColor::STONE_GRAY,
            Block::Water => MapColor::WATER_BLUE,
        }
    }

    fn fluid_block(&self, block: &Block) -> Option<Block> {
        match block {
            Block::Water => Some(Block::Water),
            _ => None,
        }
    }

    fn is_full_solid_up_face(&self, block: &Block, _x: i32, _y: i32, _z: i32) -> bool {
        !matches!(block, Block::Air | Block::Water)
    }
}

impl HostUnit for TerrainUnit {
    fn dimension(&self) -> &str {
        &self.dimension
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// One request as the transport received it
#[derive(Debug, Clone)]
pub struct Sent {
    pub request: Request,
    pub body: Option<Vec<u8>>,
}

impl Sent {
    pub fn packets(&self) -> Vec<Packet> {
        self.body.as_deref().map(decode_body).unwrap_or_default()
    }
}

/// Transport that keeps every request, optionally failing all of them after recording
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn with_method(&self, method: HttpMethod) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|sent| sent.request.method == method)
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &Request, body: Option<&[u8]>) -> Result<String> {
        self.sent.lock().unwrap().push(Sent {
            request: request.clone(),
            body: body.map(<[u8]>::to_vec),
        });
        if self.fail {
            return Err(WebMapError::TransportError("connection refused".to_owned()));
        }
        Ok(String::new())
    }
}

pub fn decode_image(packet: &Packet) -> Vec<u8> {
    BASE64.decode(&packet.data).unwrap()
}

pub fn decode_body(body: &[u8]) -> Vec<Packet> {
    serde_json::from_reader(GzDecoder::new(body)).unwrap()
}

pub fn test_config() -> Config {
    Config {
        render_threads: 2,
        upload_threads: 2,
        batch_size: 100,
        tick_interval: 4,
        ..Config::default()
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        identifier: SERVER_ID.to_owned(),
        token: TOKEN.to_owned(),
    }
}

/// Web map with credentials already issued
pub fn create_map(config: Config, transport: Arc<RecordingTransport>) -> Arc<WebMap> {
    create_map_with(config, transport, IntegrationRegistry::empty())
}

pub fn create_map_with(
    config: Config,
    transport: Arc<RecordingTransport>,
    integrations: IntegrationRegistry,
) -> Arc<WebMap> {
    let map = WebMap::new(config, transport, integrations).unwrap();
    map.set_credentials(Some(credentials()));
    map
}

pub fn assert_idle(map: &WebMap) {
    assert!(map.wait_idle(IDLE_TIMEOUT), "pipeline did not go idle");
    assert_eq!(map.counters().outstanding_renders(), 0);
    assert_eq!(map.counters().outstanding_uploads(), 0);
}
