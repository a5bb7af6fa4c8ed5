use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use webmap_common::UNIT_SPAN;
use webmap_render::MapImage;

/// One rendered unit as it travels inside a batch body.
/// `meta` carries the metadata object already serialized to JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub x: i32,
    pub z: i32,
    pub meta: String,
    pub data: String,
}

impl Packet {
    /// Packs an image rendered for the unit starting at world-block `(start_x, start_z)`.
    pub fn encode(start_x: i32, start_z: i32, image: &MapImage, meta: &Map<String, Value>) -> Self {
        Self {
            x: start_x.div_euclid(UNIT_SPAN),
            z: start_z.div_euclid(UNIT_SPAN),
            meta: Value::Object(meta.clone()).to_string(),
            data: BASE64.encode(image.as_bytes()),
        }
    }
}
