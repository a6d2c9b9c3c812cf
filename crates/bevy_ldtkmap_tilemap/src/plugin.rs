//! Main plugin for `bevy_ldtkmap_tilemap`.

use bevy::prelude::*;

use crate::config::TilemapRenderConfig;
use crate::images;
use crate::tiles;

/// Plugin for rendering LDtk levels with `bevy_ecs_tilemap` and sprites.
///
/// This Layer 3 plugin observes events from `bevy_ldtkmap_core` and adds
/// rendering components to entities.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_tilemap::{TilemapPlugin, TilemapRenderConfig};
/// App::new().add_plugins(TilemapPlugin::new(TilemapRenderConfig {
///     render_backgrounds: false,
///     ..default()
/// }));
/// ```
#[derive(Default)]
pub struct TilemapPlugin {
    /// Configuration for rendering
    pub config: TilemapRenderConfig,
}

impl TilemapPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: TilemapRenderConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TilemapPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_ecs_tilemap::TilemapPlugin);

        app.insert_resource(self.config.clone());

        // Tile, auto and auto-tiled int-grid layers
        app.add_observer(tiles::on_tile_layer_spawned);

        // Simplified level composites
        app.add_observer(images::on_composite_spawned);

        // Level backgrounds (checks the config at trigger time)
        app.add_observer(images::on_level_spawned);

        info!("TilemapPlugin initialized");
    }
}
