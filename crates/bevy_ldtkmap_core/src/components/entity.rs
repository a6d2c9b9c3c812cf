//! Entity components.

use bevy::prelude::*;

/// An LDtk entity instance.
///
/// The entity's translation is its pivot point. Use
/// [`center_offset`](Self::center_offset) to reach the center of its box.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct LdtkEntity {
    /// Entity definition identifier (e.g. `"Player"`)
    pub identifier: String,
    pub iid: String,
    /// Box size in pixels
    pub size: Vec2,
    /// Pivot in LDtk's convention: (0, 0) top-left, (1, 1) bottom-right
    pub pivot: Vec2,
    /// Grid cell in the layer, `(col, row)` with row 0 at the top
    pub grid: IVec2,
    pub tags: Vec<String>,
}

impl LdtkEntity {
    /// Offset from the pivot to the box center, y up.
    pub fn center_offset(&self) -> Vec2 {
        Vec2::new(
            (0.5 - self.pivot.x) * self.size.x,
            (self.pivot.y - 0.5) * self.size.y,
        )
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(pivot: Vec2) -> LdtkEntity {
        LdtkEntity {
            identifier: "Player".into(),
            iid: String::new(),
            size: Vec2::new(16.0, 32.0),
            pivot,
            grid: IVec2::ZERO,
            tags: vec!["actor".into()],
        }
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(entity(Vec2::ZERO).center_offset(), Vec2::new(8.0, -16.0));
        assert_eq!(entity(Vec2::splat(0.5)).center_offset(), Vec2::ZERO);
        assert_eq!(entity(Vec2::new(0.5, 1.0)).center_offset(), Vec2::new(0.0, 16.0));
    }

    #[test]
    fn test_tags() {
        assert!(entity(Vec2::ZERO).has_tag("actor"));
        assert!(!entity(Vec2::ZERO).has_tag("enemy"));
    }
}
