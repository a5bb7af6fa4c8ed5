/// Coarse map color class assigned to a block. `id` identifies the class, `color` is 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapColor {
    pub id: u8,
    pub color: u32,
}

impl MapColor {
    pub const CLEAR: MapColor = MapColor::new(0, 0x000000);
    pub const PALE_GREEN: MapColor = MapColor::new(1, 0x7FB238);
    pub const PALE_YELLOW: MapColor = MapColor::new(2, 0xF7E9A3);
    pub const WHITE_GRAY: MapColor = MapColor::new(3, 0xC7C7C7);
    pub const BRIGHT_RED: MapColor = MapColor::new(4, 0xFF0000);
    pub const PALE_PURPLE: MapColor = MapColor::new(5, 0xA0A0FF);
    pub const IRON_GRAY: MapColor = MapColor::new(6, 0xA7A7A7);
    pub const DARK_GREEN: MapColor = MapColor::new(7, 0x007C00);
    pub const WHITE: MapColor = MapColor::new(8, 0xFFFFFF);
    pub const LIGHT_BLUE_GRAY: MapColor = MapColor::new(9, 0xA4A8B8);
    pub const DIRT_BROWN: MapColor = MapColor::new(10, 0x976D4D);
    pub const STONE_GRAY: MapColor = MapColor::new(11, 0x707070);
    pub const WATER_BLUE: MapColor = MapColor::new(12, 0x4040FF);
    pub const OAK_TAN: MapColor = MapColor::new(13, 0x8F7748);

    /// Color used for columns whose surface lies at or below the world floor
    pub const BEDROCK: MapColor = MapColor::STONE_GRAY;

    pub const fn new(id: u8, color: u32) -> Self {
        Self { id, color }
    }

    pub fn is_clear(&self) -> bool {
        self.id == MapColor::CLEAR.id
    }

    /// Water-classified colors use the depth shading rule instead of relief shading
    pub fn is_water(&self) -> bool {
        self.id == MapColor::WATER_BLUE.id
    }

    pub fn rgb(&self) -> [u8; 3] {
        [
            (self.color >> 16 & 0xFF) as u8,
            (self.color >> 8 & 0xFF) as u8,
            (self.color & 0xFF) as u8,
        ]
    }

    /// Each channel scaled by `brightness / 255`, rounded down
    pub fn shaded(&self, brightness: Brightness) -> [u8; 3] {
        let scalar = brightness.scalar();
        self.rgb()
            .map(|channel| (channel as u32 * scalar / 255) as u8)
    }
}

/// Brightness tier chosen by the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    Low,
    Normal,
    High,
}

impl Brightness {
    pub fn scalar(&self) -> u32 {
        match self {
            Brightness::Low => 180,
            Brightness::Normal => 220,
            Brightness::High => 255,
        }
    }
}
