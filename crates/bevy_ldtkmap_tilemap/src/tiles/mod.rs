//! Tile layer rendering module.

pub mod render;
pub mod tilemap_builder;

pub use render::on_tile_layer_spawned;
pub use tilemap_builder::{TilemapBuilder, TilemapSublayer};
