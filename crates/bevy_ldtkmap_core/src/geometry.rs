//! Grid and coordinate arithmetic.
//!
//! LDtk works in pixels with the origin at the top-left of each level and y
//! growing downward. Bevy is y-up, so every level is spawned with its origin at
//! the bottom-left corner and positions inside it are flipped vertically.

use bevy::prelude::*;

/// Convert a flat int-grid index into a `(col, row)` cell.
///
/// Returns `None` for a zero-width grid.
pub fn index_to_cell(index: usize, width: u32) -> Option<UVec2> {
    if width == 0 {
        return None;
    }
    let width = width as usize;
    Some(UVec2::new((index % width) as u32, (index / width) as u32))
}

/// Top-left corner of a cell in LDtk pixel space (y down).
pub fn cell_to_px(cell: UVec2, cell_size: u32) -> IVec2 {
    (cell * cell_size).as_ivec2()
}

/// Translation of a level entity relative to its project root.
///
/// LDtk world coordinates are y-down and point at the top-left corner of the
/// level; the level entity sits at its bottom-left corner in y-up space.
pub fn level_translation(world_x: i32, world_y: i32, px_hei: i32) -> Vec2 {
    Vec2::new(world_x as f32, -((world_y + px_hei) as f32))
}

/// Parse an LDtk color string (`#RRGGBB` or `#RRGGBBAA`).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    Srgba::hex(hex).ok().map(Color::Srgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_cell() {
        assert_eq!(index_to_cell(0, 4), Some(UVec2::new(0, 0)));
        assert_eq!(index_to_cell(5, 4), Some(UVec2::new(1, 1)));
        assert_eq!(index_to_cell(11, 4), Some(UVec2::new(3, 2)));
        assert_eq!(index_to_cell(3, 0), None);
    }

    #[test]
    fn test_cell_to_px() {
        assert_eq!(cell_to_px(UVec2::new(1, 1), 16), IVec2::new(16, 16));
        assert_eq!(cell_to_px(UVec2::new(3, 0), 8), IVec2::new(24, 0));
    }

    #[test]
    fn test_index_round_trips_through_pixels() {
        // Cell 10 of a 4-wide, 16px grid starts at (32, 32)
        let cell = index_to_cell(10, 4).unwrap();
        assert_eq!(cell_to_px(cell, 16), IVec2::new(32, 32));
    }

    #[test]
    fn test_level_translation() {
        assert_eq!(level_translation(0, 0, 256), Vec2::new(0.0, -256.0));
        assert_eq!(level_translation(512, 128, 64), Vec2::new(512.0, -192.0));
    }

    #[test]
    fn test_parse_hex_color() {
        let color = parse_hex_color("#FF0000").unwrap();
        assert_eq!(color, Color::srgb(1.0, 0.0, 0.0));
        assert!(parse_hex_color("#F0").is_none());
        assert!(parse_hex_color("not a color").is_none());
    }
}
