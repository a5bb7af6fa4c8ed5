pub mod error;
pub mod types;

pub use error::WebMapError;
pub use types::{Result, UnitPos, UNIT_SPAN};
