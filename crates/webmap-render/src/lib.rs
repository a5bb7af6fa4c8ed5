pub mod color;
pub mod image;
pub mod sampler;
pub mod shader;

pub use color::{Brightness, MapColor};
pub use image::{MapImage, IMAGE_LEN};
pub use sampler::{sample_unit, ColumnSample, ColumnSource, Heightmap};
pub use shader::shade;
