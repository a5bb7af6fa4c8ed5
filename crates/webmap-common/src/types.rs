use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, crate::error::WebMapError>;

/// Number of columns along each horizontal edge of a region unit.
pub const UNIT_SPAN: i32 = 16;

/// Identity of a 16x16 column region, in unit-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitPos {
    pub x: i32,
    pub z: i32,
}

impl UnitPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn start_x(&self) -> i32 {
        self.x * UNIT_SPAN
    }

    pub fn start_z(&self) -> i32 {
        self.z * UNIT_SPAN
    }

    /// Packs both coordinates into one key, x in the low half and z in the high half.
    pub fn packed(&self) -> u64 {
        (self.x as u32 as u64) | ((self.z as u32 as u64) << 32)
    }
}
