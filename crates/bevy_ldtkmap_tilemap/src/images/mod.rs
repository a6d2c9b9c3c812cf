//! Sprite rendering for level-wide images.

pub mod background;
pub mod composite;

pub use background::{LevelBackgroundSprite, on_level_spawned};
pub use composite::on_composite_spawned;
