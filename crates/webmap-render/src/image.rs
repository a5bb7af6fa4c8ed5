use crate::color::{Brightness, MapColor};

/// Bytes in one rendered unit: 16x16 columns, 4 bytes each
pub const IMAGE_LEN: usize = 16 * 16 * 4;

/// Fourth byte of every pixel. Receivers treat it as a format marker rather than real opacity.
pub const ALPHA_MARKER: u8 = 127;

/// Rendered colors of one unit, laid out as `x * 4 + z * 64`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapImage {
    bytes: [u8; IMAGE_LEN],
}

impl MapImage {
    pub fn new() -> Self {
        Self {
            bytes: [0; IMAGE_LEN],
        }
    }

    fn offset(x: usize, z: usize) -> usize {
        x * 4 + z * 64
    }

    pub fn put(&mut self, x: usize, z: usize, color: MapColor, brightness: Brightness) {
        let offset = Self::offset(x, z);
        let [r, g, b] = color.shaded(brightness);
        self.bytes[offset..offset + 4].copy_from_slice(&[r, g, b, ALPHA_MARKER]);
    }

    pub fn pixel(&self, x: usize, z: usize) -> [u8; 4] {
        let offset = Self::offset(x, z);
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.bytes[offset..offset + 4]);
        pixel
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for MapImage {
    fn default() -> Self {
        Self::new()
    }
}
