//! Unified plugin for bevy_ldtkmap.

use bevy::prelude::*;

use bevy_ldtkmap_assets::LdtkAssetsPlugin;
use bevy_ldtkmap_core::{LayerZConfig, LdtkCoreConfig, LdtkCorePlugin};

#[cfg(feature = "tilemap")]
use bevy_ldtkmap_tilemap::{TilemapPlugin, TilemapRenderConfig};

#[cfg(feature = "avian")]
use bevy_ldtkmap_avian::{LdtkAvianPlugin, PhysicsConfig};

/// Unified plugin that adds all enabled bevy_ldtkmap functionality.
///
/// This plugin automatically includes:
/// - Asset loading ([`LdtkAssetsPlugin`])
/// - Core ECS spawning ([`LdtkCorePlugin`])
/// - Enabled Layer 3 integrations based on feature flags
///
/// # Features
///
/// - `tilemap` (default): Adds `TilemapPlugin` for rendering with bevy_ecs_tilemap
/// - `avian`: Adds `LdtkAvianPlugin` for Avian2D physics integration
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         BevyLdtkmapPlugin::default()
///             .with_core(LdtkCoreConfig {
///                 spawn_hidden_layers: true,
///                 ..default()
///             })
///             .with_layer_z(LayerZConfig {
///                 offset: 10.0,
///                 multiplier: 2.0,
///             }),
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyLdtkmapPlugin {
    /// Core configuration
    pub core: LdtkCoreConfig,

    /// Layer z placement
    pub layer_z: LayerZConfig,

    /// Tilemap rendering configuration (if feature enabled)
    #[cfg(feature = "tilemap")]
    pub tilemap: TilemapRenderConfig,

    /// Avian physics configuration (if feature enabled)
    #[cfg(feature = "avian")]
    pub avian: PhysicsConfig,
}

impl BevyLdtkmapPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: LdtkCoreConfig) -> Self {
        self.core = config;
        self
    }

    /// Create with custom layer z placement
    pub fn with_layer_z(mut self, config: LayerZConfig) -> Self {
        self.layer_z = config;
        self
    }

    /// Create with custom tilemap rendering configuration
    #[cfg(feature = "tilemap")]
    pub fn with_tilemap(mut self, config: TilemapRenderConfig) -> Self {
        self.tilemap = config;
        self
    }

    /// Create with custom Avian physics configuration
    #[cfg(feature = "avian")]
    pub fn with_avian(mut self, config: PhysicsConfig) -> Self {
        self.avian = config;
        self
    }
}

impl Plugin for BevyLdtkmapPlugin {
    fn build(&self, app: &mut App) {
        // Layer 1: Assets (always required)
        app.add_plugins(LdtkAssetsPlugin);

        // Inserted first so the core plugin keeps it
        app.insert_resource(self.layer_z.clone());

        // Layer 2: Core (always required)
        app.add_plugins(LdtkCorePlugin::new(self.core.clone()));

        // Layer 3: Rendering (feature-gated)
        #[cfg(feature = "tilemap")]
        app.add_plugins(TilemapPlugin::new(self.tilemap.clone()));

        // Layer 3: Physics (feature-gated)
        #[cfg(feature = "avian")]
        app.add_plugins(LdtkAvianPlugin::new(self.avian.clone()));

        info!("BevyLdtkmapPlugin initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_replace_config() {
        let plugin = BevyLdtkmapPlugin::default()
            .with_core(LdtkCoreConfig {
                warn_unmapped_entities: false,
                ..default()
            })
            .with_layer_z(LayerZConfig {
                offset: 3.0,
                multiplier: 0.5,
            });

        assert!(!plugin.core.warn_unmapped_entities);
        assert_eq!(plugin.core.simplified_grid_size, 16);
        assert_eq!(plugin.layer_z.z_for(2), 4.0);
    }
}
