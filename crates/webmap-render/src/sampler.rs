use crate::color::MapColor;
use crate::image::MapImage;
use crate::shader::shade;
use webmap_common::{Result, UnitPos, UNIT_SPAN};

const SPAN: usize = UNIT_SPAN as usize;

/// Surface heights of one unit, indexed by local `(x, z)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    heights: [[i32; SPAN]; SPAN],
}

impl Heightmap {
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> i32) -> Self {
        let mut heights = [[0; SPAN]; SPAN];
        for (x, row) in heights.iter_mut().enumerate() {
            for (z, height) in row.iter_mut().enumerate() {
                *height = f(x, z);
            }
        }
        Self { heights }
    }

    pub fn flat(height: i32) -> Self {
        Self::from_fn(|_, _| height)
    }

    pub fn get(&self, x: usize, z: usize) -> i32 {
        self.heights[x][z]
    }
}

/// Read access to the world data of a single unit. Coordinates passed to the block methods are
/// world-block coordinates.
pub trait ColumnSource {
    type Block;

    fn unit(&self) -> UnitPos;

    /// Lowest valid block Y of the world
    fn min_y(&self) -> i32;

    /// Height of the first free block above the surface for each column. `None` when the host
    /// has no heightmap for this unit yet.
    fn heightmap(&self) -> Option<Heightmap>;

    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<Self::Block>;

    fn map_color(&self, block: &Self::Block, x: i32, y: i32, z: i32) -> MapColor;

    /// Block state of the fluid contained in `block`, if it holds any
    fn fluid_block(&self, block: &Self::Block) -> Option<Self::Block>;

    fn is_full_solid_up_face(&self, block: &Self::Block, x: i32, y: i32, z: i32) -> bool;
}

/// Resolved surface of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSample {
    pub height: i32,
    pub color: MapColor,
    pub fluid_depth: u32,
}

/// Renders one unit. Returns `Ok(None)` when the unit has no heightmap yet.
pub fn sample_unit<S: ColumnSource + ?Sized>(source: &S) -> Result<Option<MapImage>> {
    let heightmap = match source.heightmap() {
        Some(heightmap) => heightmap,
        None => return Ok(None),
    };

    let unit = source.unit();
    let min_y = source.min_y();
    let mut image = MapImage::new();

    for x in 0..SPAN {
        let mut last_height = None;
        for z in 0..SPAN {
            let column = sample_column(
                source,
                unit.start_x() + x as i32,
                unit.start_z() + z as i32,
                heightmap.get(x, z),
                min_y,
            )?;

            let brightness = shade(
                column.color,
                x,
                z,
                last_height.unwrap_or(column.height),
                column.height,
                column.fluid_depth,
            );
            image.put(x, z, column.color, brightness);

            last_height = Some(column.height);
        }
    }

    Ok(Some(image))
}

/// Walks one column down from its heightmap surface to the first block with a map color
pub fn sample_column<S: ColumnSource + ?Sized>(
    source: &S,
    x: i32,
    z: i32,
    surface: i32,
    min_y: i32,
) -> Result<ColumnSample> {
    if surface <= min_y {
        return Ok(ColumnSample {
            height: surface,
            color: MapColor::BEDROCK,
            fluid_depth: 0,
        });
    }

    let mut height = surface;
    let (block, mut color) = loop {
        height -= 1;
        if height < min_y {
            break (None, MapColor::CLEAR);
        }
        let block = source.block_at(x, height, z)?;
        let color = source.map_color(&block, x, height, z);
        if !color.is_clear() {
            break (Some(block), color);
        }
    };

    let mut fluid_depth = 0;
    if let Some(block) = block {
        if let Some(fluid) = source.fluid_block(&block) {
            let mut y = height - 1;
            loop {
                let below_is_fluid = y >= min_y && {
                    let below = source.block_at(x, y, z)?;
                    source.fluid_block(&below).is_some()
                };
                y -= 1;
                fluid_depth += 1;
                if !(y > min_y && below_is_fluid) {
                    break;
                }
            }

            if !source.is_full_solid_up_face(&block, x, height, z) {
                color = source.map_color(&fluid, x, height, z);
            }
        }
    }

    Ok(ColumnSample {
        height,
        color,
        fluid_depth,
    })
}
