//! # `bevy_ldtkmap_tilemap`
//!
//! Tile layer rendering for `bevy_ldtkmap` using `bevy_ecs_tilemap`.
//!
//! This crate is a Layer 3 plugin that observes spawning events from `bevy_ldtkmap_core`
//! and adds rendering components using `bevy_ecs_tilemap` for batched rendering.
//!
//! ## Features
//!
//! - **Tile layers**: Tiles, auto-layers and auto-tiled int-grids as tilemaps
//! - **Stacked tiles**: Cells with several tiles become stacked sub-tilemaps
//! - **Composites**: The flattened image of simplified levels as a sprite
//! - **Backgrounds**: Level background colors as solid sprites
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap_assets::LdtkAssetsPlugin;
//! use bevy_ldtkmap_core::prelude::*;
//! use bevy_ldtkmap_tilemap::TilemapPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LdtkAssetsPlugin)
//!         .add_plugins(LdtkCorePlugin::default())
//!         .add_plugins(TilemapPlugin::default())
//!         .add_systems(Startup, spawn_project)
//!         .run();
//! }
//!
//! fn spawn_project(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(LdtkProject {
//!         handle: asset_server.load("world.ldtk"),
//!     });
//! }
//! ```

pub mod config;
pub mod images;
pub mod plugin;
pub mod tiles;

pub use config::TilemapRenderConfig;
pub use plugin::TilemapPlugin;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::TilemapRenderConfig;
    pub use crate::images::LevelBackgroundSprite;
    pub use crate::plugin::TilemapPlugin;
    pub use crate::tiles::TilemapSublayer;
}
