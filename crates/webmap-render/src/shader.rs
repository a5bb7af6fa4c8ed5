use crate::color::{Brightness, MapColor};

/// Picks the brightness tier of one column.
///
/// `x` and `z` are the column's offsets inside its unit; only their parity matters.
/// `last_height` is the resolved height of the previous column in the same row, or `height`
/// itself for the first column. The arithmetic is done in `f64` in this exact order so that
/// threshold ties fall the same way as on every other renderer of this map format.
pub fn shade(
    color: MapColor,
    x: usize,
    z: usize,
    last_height: i32,
    height: i32,
    depth: u32,
) -> Brightness {
    let parity = ((x + z) & 1) as f64;

    if color.is_water() {
        let f = depth as f64 * 0.1 + parity * 0.2;
        if f < 0.5 {
            Brightness::High
        } else if f > 0.9 {
            Brightness::Low
        } else {
            Brightness::Normal
        }
    } else {
        let f = (height - last_height) as f64 * 0.8 + (parity - 0.5) * 0.4;
        if f > 0.6 {
            Brightness::High
        } else if f < -0.6 {
            Brightness::Low
        } else {
            Brightness::Normal
        }
    }
}
