//! # `bevy_ldtkmap_core`
//!
//! Entity spawning backbone for `bevy_ldtkmap`. Walks loaded LDtk assets
//! (level → layers → entities / int-grid / tiles) and builds the matching ECS
//! hierarchy, with coordinate conversion, typed entity fields and extension
//! hooks.
//!
//! **This crate does NOT handle rendering or physics** - those are Layer 3 concerns that
//! plug in via events and component queries.
//!
//! ## Architecture
//!
//! Layer 2 (this crate) sits between:
//! - **Layer 1** (`bevy_ldtkmap_assets`): Pure asset loading
//! - **Layer 3** (`bevy_ldtkmap_tilemap`, `bevy_ldtkmap_avian`): Rendering/physics plugins
//!
//! ## What Layer 2 Provides
//!
//! 1. **Entity hierarchy**: Project → levels → layers → entities (NOT individual tiles or cells)
//! 2. **Pre-processed data**: `IntGridData`, `TileLayerData`, `CompositeImage`
//! 3. **Typed fields**: `LdtkFields` plus `#[derive(LdtkFields)]` components per entity identifier
//! 4. **Events**: Extension hooks for Layer 3 plugins
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap_assets::LdtkAssetsPlugin;
//! use bevy_ldtkmap_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LdtkAssetsPlugin)
//!         .add_plugins(LdtkCorePlugin::default())
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

// Lets `#[derive(LdtkFields)]` refer to this crate by name from inside it
extern crate self as bevy_ldtkmap_core;

pub mod components;
pub mod debug;
pub mod events;
pub mod fields;
pub mod geometry;
pub mod plugin;
pub mod registry;
pub mod spawn;
pub mod systems;

// Used by code generated from `#[derive(LdtkFields)]`
#[doc(hidden)]
pub use inventory;

pub mod prelude {
    //! Common imports for `bevy_ldtkmap_core` users.

    pub use crate::components::{
        CompositeImage, IntGridData, LayerGeometry, LayerIid, LayersInLevel, LdtkEntity,
        LdtkLayer, LdtkLayerLevelOf, LdtkLevel, LdtkLevelProjectOf, LdtkProject, LdtkSceneRoot,
        LdtkSimplifiedLevel, LdtkSimplifiedWorld, LdtkTile, LevelBackground, LevelGeometry,
        LevelSelection, LevelsInProject, TileLayerData, TilesetInfo,
    };
    pub use crate::debug::DebugLevelGeometry;
    pub use crate::events::{
        CompositeSpawned, EntityLayerSpawned, EntitySpawned, IntGridLayerSpawned, LevelSpawned,
        ProjectSpawned, TileLayerSpawned,
    };
    pub use crate::fields::{
        EntityRef, FieldError, FieldValue, FromFieldValue, FromLdtkFields, LdtkFields, TileRect,
    };
    pub use crate::plugin::{LayerZConfig, LdtkCoreConfig, LdtkCorePlugin};
    pub use crate::registry::{LdtkEntityAppExt, LdtkEntityHandler, LdtkEntityRegistry};
    pub use crate::systems::RespawnLdtk;

    // Re-export the derive macros
    pub use bevy_ldtkmap_macros::{LdtkEnum, LdtkFields};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{LayerZConfig, LdtkCoreConfig, LdtkCorePlugin};
