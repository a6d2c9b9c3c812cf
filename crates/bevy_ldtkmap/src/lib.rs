//! # bevy_ldtkmap
//!
//! LDtk project loader and integration for Bevy.
//!
//! This is a unified meta-crate that combines all `bevy_ldtkmap_*` sub-crates with convenient
//! feature flags for easy integration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyLdtkmapPlugin::default())
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
//!
//! Levels exported with LDtk's "super simple export" load the same way, one
//! root per level:
//!
//! ```rust,no_run
//! # use bevy::prelude::*;
//! # use bevy_ldtkmap::prelude::*;
//! fn spawn_level(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(LdtkSimplifiedLevel {
//!         handle: asset_server.load("world/simplified/Level_0/data.json"),
//!     });
//! }
//! ```
//!
//! or all at once, reading the level list from the project file:
//!
//! ```rust,no_run
//! # use bevy::prelude::*;
//! # use bevy_ldtkmap::prelude::*;
//! fn spawn_world(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(LdtkSimplifiedWorld {
//!         handle: asset_server.load("world.ldtk"),
//!     });
//! }
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `tilemap` feature for rendering
//! - **tilemap**: Tile layers, composites and backgrounds using `bevy_ecs_tilemap`
//! - **avian**: Physics colliders for int-grids and entities using `avian2d`
//!
//! ## Architecture
//!
//! This crate is organized into 3 layers:
//!
//! - **Layer 1** ([`assets`]): Pure asset loading for LDtk files (`.ldtk`, `.ldtkl`, simplified `data.json`)
//! - **Layer 2** ([`core`]): ECS entity spawning with typed fields and events
//! - **Layer 3** (optional): Integration plugins for rendering and physics
//!   - `tilemap`: Tile layer rendering with `bevy_ecs_tilemap`
//!   - `avian`: Physics integration with Avian2D
//!
//! ## Using Individual Crates
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap_assets::LdtkAssetsPlugin;
//! use bevy_ldtkmap_core::prelude::*;
//! use bevy_ldtkmap_tilemap::TilemapPlugin;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(LdtkAssetsPlugin)
//!     .add_plugins(LdtkCorePlugin::default())
//!     .add_plugins(TilemapPlugin::default())
//!     .run();
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_ldtkmap_assets as assets;
pub use bevy_ldtkmap_core as core;

#[cfg(feature = "tilemap")]
pub use bevy_ldtkmap_tilemap as tilemap;

#[cfg(feature = "avian")]
pub use bevy_ldtkmap_avian as avian;

/// Unified prelude for bevy_ldtkmap
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap::prelude::*;
///
/// fn my_system(
///     levels: Query<&LdtkLevel>,
///     entities: Query<(&LdtkEntity, &LdtkFields)>,
/// ) {
///     // Work with LDtk entities...
/// }
/// ```
pub mod prelude {
    // Core functionality (always available)
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    // Layer 3 plugins (feature-gated)
    #[cfg(feature = "tilemap")]
    pub use crate::tilemap::prelude::*;

    #[cfg(feature = "avian")]
    pub use crate::avian::prelude::*;

    // Unified plugin
    pub use crate::plugin::BevyLdtkmapPlugin;
}
