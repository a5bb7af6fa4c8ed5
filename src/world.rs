use std::sync::Arc;
use uuid::Uuid;
use webmap_common::{Result, UnitPos};
use webmap_render::{ColumnSource, Heightmap, MapColor};
use webmap_server::{DimensionSnapshot, HostUnit, PlayerSnapshot, ServerSnapshot};

pub const OVERWORLD: &str = "minecraft:overworld";

const TICKS_PER_DAY: i64 = 24000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Air,
    Grass,
    Sand,
    Stone,
    Water,
    Bedrock,
}

/// Procedurally generated rolling hills around a circular lake centered on the origin
#[derive(Debug, Clone)]
pub struct DemoWorld {
    pub min_y: i32,
    pub sea_level: i32,
    pub lake_radius: f64,
}

impl Default for DemoWorld {
    fn default() -> Self {
        Self {
            min_y: -64,
            sea_level: 63,
            lake_radius: 24.0,
        }
    }
}

impl DemoWorld {
    /// Y of the topmost solid block of a column
    pub fn ground(&self, x: i32, z: i32) -> i32 {
        let wave = (x as f64 / 9.0).sin() * 3.0 + (z as f64 / 13.0).cos() * 2.0;
        let distance = ((x as f64).powi(2) + (z as f64).powi(2)).sqrt();
        let basin = (self.lake_radius - distance).max(0.0) / 2.0;
        (self.sea_level as f64 + 3.0 + wave - basin).round() as i32
    }

    pub fn block(&self, x: i32, y: i32, z: i32) -> Block {
        let ground = self.ground(x, z);
        if y <= self.min_y {
            Block::Bedrock
        } else if y < ground {
            Block::Stone
        } else if y == ground {
            if ground < self.sea_level + 1 {
                Block::Sand
            } else {
                Block::Grass
            }
        } else if y <= self.sea_level {
            Block::Water
        } else {
            Block::Air
        }
    }

    pub fn unit(self: &Arc<Self>, dimension: &str, pos: UnitPos) -> DemoUnit {
        DemoUnit {
            world: Arc::clone(self),
            dimension: dimension.to_owned(),
            pos,
        }
    }

    /// World state as the host would report it on a metadata tick
    pub fn snapshot(&self, tick: u64) -> ServerSnapshot {
        let angle = tick as f64 / 40.0;
        let radius = self.lake_radius + 8.0;
        let x = angle.cos() * radius;
        let z = angle.sin() * radius;
        let player = PlayerSnapshot {
            name: "Steve".to_owned(),
            uuid: Uuid::new_v3(&Uuid::NAMESPACE_OID, b"OfflinePlayer:Steve"),
            x,
            y: (self.ground(x as i32, z as i32) + 1) as f64,
            z,
        };

        ServerSnapshot {
            motd: "A webmap demo world".to_owned(),
            dimensions: vec![DimensionSnapshot {
                id: OVERWORLD.to_owned(),
                time_of_day: 6000 + tick as i64 * 20 % (TICKS_PER_DAY * 8),
                raining: tick / 600 % 2 == 1,
                players: vec![player],
            }],
        }
    }
}

/// One unit of a [`DemoWorld`], sampled straight from the terrain function
pub struct DemoUnit {
    world: Arc<DemoWorld>,
    dimension: String,
    pos: UnitPos,
}

impl ColumnSource for DemoUnit {
    type Block = Block;

    fn unit(&self) -> UnitPos {
        self.pos
    }

    fn min_y(&self) -> i32 {
        self.world.min_y
    }

    fn heightmap(&self) -> Option<Heightmap> {
        let (start_x, start_z) = (self.pos.start_x(), self.pos.start_z());
        Some(Heightmap::from_fn(|x, z| {
            let ground = self.world.ground(start_x + x as i32, start_z + z as i32);
            ground.max(self.world.sea_level) + 1
        }))
    }

    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<Block> {
        Ok(self.world.block(x, y, z))
    }

    fn map_color(&self, block: &Block, _x: i32, _y: i32, _z: i32) -> MapColor {
        match block {
            Block::Air => MapColor::CLEAR,
            Block::Grass => MapColor::PALE_GREEN,
            Block::Sand => MapColor::PALE_YELLOW,
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

impl HostUnit for DemoUnit {
    fn dimension(&self) -> &str {
        &self.dimension
    }
}
