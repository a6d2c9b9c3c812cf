//! Level components.

use bevy::prelude::*;

/// Identity of a spawned LDtk level.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct LdtkLevel {
    pub identifier: String,
    pub iid: String,
    /// Numeric uid (`0` for simplified levels, which don't export one)
    pub uid: i32,
}

/// Background color of a level, as set in the LDtk editor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LevelBackground(pub Color);

/// Flattened image of every visible layer, from the "super simple export".
///
/// Attached to a child of the level entity positioned at the level's center.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct CompositeImage {
    pub image: Handle<Image>,
    /// Level size in pixels
    pub size: Vec2,
}

/// Level-space geometry and the y-axis conversion between LDtk and Bevy.
///
/// # Coordinate System
///
/// - Origin (0, 0) is at the bottom-left corner of the level
/// - X increases rightward, Y increases upward (standard Bevy convention)
///
/// LDtk pixel coordinates (origin top-left, y down) go through
/// [`px_to_local`](Self::px_to_local) before they become translations.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::LevelGeometry;
/// fn check_player_in_bounds(
///     player: Single<&Transform, With<Player>>,
///     level: Single<&LevelGeometry>,
/// ) {
///     if level.contains(player.translation.truncate()) {
///         // Player is inside the level
///     }
/// }
/// # #[derive(Component)] struct Player;
/// ```
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LevelGeometry {
    /// Level size in pixels
    pub size_px: Vec2,
    /// Level-space bounds, `min` at (0, 0)
    pub bounds: Rect,
}

impl LevelGeometry {
    pub fn new(px_wid: i32, px_hei: i32) -> Self {
        let size_px = Vec2::new(px_wid as f32, px_hei as f32);
        Self {
            size_px,
            bounds: Rect {
                min: Vec2::ZERO,
                max: size_px,
            },
        }
    }

    /// LDtk level pixel position (y down) to level-space position (y up).
    pub fn px_to_local(&self, px: IVec2) -> Vec2 {
        Vec2::new(px.x as f32, self.size_px.y - px.y as f32)
    }

    /// Level-space position (y up) back to LDtk pixel space (y down).
    pub fn local_to_px(&self, local: Vec2) -> Vec2 {
        Vec2::new(local.x, self.size_px.y - local.y)
    }

    /// Level-space center of the cell at `(col, row)`.
    pub fn cell_center(&self, cell: UVec2, cell_size: u32) -> Vec2 {
        let half = cell_size as f32 / 2.0;
        Vec2::new(
            (cell.x * cell_size) as f32 + half,
            self.size_px.y - ((cell.y * cell_size) as f32 + half),
        )
    }

    /// Center of the whole level in level space.
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn contains(&self, local: Vec2) -> bool {
        self.bounds.contains(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_local_flips_y() {
        let geometry = LevelGeometry::new(256, 128);

        assert_eq!(geometry.px_to_local(IVec2::new(0, 0)), Vec2::new(0.0, 128.0));
        assert_eq!(geometry.px_to_local(IVec2::new(32, 128)), Vec2::new(32.0, 0.0));
        assert_eq!(geometry.local_to_px(Vec2::new(32.0, 0.0)), Vec2::new(32.0, 128.0));
    }

    #[test]
    fn test_cell_center() {
        let geometry = LevelGeometry::new(64, 64);

        // Top-left cell
        assert_eq!(geometry.cell_center(UVec2::new(0, 0), 16), Vec2::new(8.0, 56.0));
        // Bottom-right cell
        assert_eq!(geometry.cell_center(UVec2::new(3, 3), 16), Vec2::new(56.0, 8.0));
    }

    #[test]
    fn test_bounds() {
        let geometry = LevelGeometry::new(320, 240);

        assert_eq!(geometry.center(), Vec2::new(160.0, 120.0));
        assert!(geometry.contains(Vec2::new(10.0, 10.0)));
        assert!(!geometry.contains(Vec2::new(-1.0, 10.0)));
    }
}
