//! Plugin for `bevy_ldtkmap_core`.

use bevy::prelude::*;

use crate::components::{
    CompositeImage, IntGridData, LayerGeometry, LayerIid, LdtkEntity, LdtkLayer, LdtkLevel,
    LdtkProject, LdtkSceneRoot, LdtkSimplifiedLevel, LdtkSimplifiedWorld, LevelBackground,
    LevelGeometry, LevelSelection, TileLayerData,
};
use crate::debug::{DebugLevelGeometry, draw_level_geometry_debug};
use crate::registry::LdtkEntityRegistry;
use crate::systems::{
    mark_modified_assets_for_respawn, process_loaded_projects, process_loaded_simplified_levels,
    process_loaded_simplified_worlds,
};

/// Configuration for layer Z-ordering.
///
/// Z value = offset + (layer_index * multiplier), where index 0 is the
/// bottom-most spawned layer of the level.
#[derive(Resource, Debug, Clone)]
pub struct LayerZConfig {
    /// Base Z offset for all layers
    pub offset: f32,
    /// Multiplier for layer index spacing
    pub multiplier: f32,
}

impl Default for LayerZConfig {
    fn default() -> Self {
        Self {
            offset: 0.0,
            multiplier: 1.0,
        }
    }
}

impl LayerZConfig {
    /// Z value of the layer at `index`.
    pub fn z_for(&self, index: usize) -> f32 {
        self.offset + index as f32 * self.multiplier
    }
}

/// Configuration for `LdtkCorePlugin`.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_core::{LdtkCoreConfig, LdtkCorePlugin};
///
/// App::new().add_plugins(LdtkCorePlugin::new(LdtkCoreConfig {
///     warn_unmapped_entities: false,
///     ..default()
/// }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct LdtkCoreConfig {
    /// Log a warning for entities with nothing registered for their identifier.
    ///
    /// Such entities are still spawned with `LdtkEntity` and `LdtkFields`.
    pub warn_unmapped_entities: bool,

    /// Spawn layers hidden in the LDtk editor (with `Visibility::Hidden`).
    pub spawn_hidden_layers: bool,

    /// Cell size for `Collisions.csv` when it can't be derived from the level width.
    pub simplified_grid_size: u32,
}

impl Default for LdtkCoreConfig {
    fn default() -> Self {
        Self {
            warn_unmapped_entities: true,
            spawn_hidden_layers: false,
            simplified_grid_size: 16,
        }
    }
}

/// Plugin for the `bevy_ldtkmap_core` entity spawning system.
///
/// Add this plugin after `LdtkAssetsPlugin` to enable automatic level spawning.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_assets::LdtkAssetsPlugin;
/// use bevy_ldtkmap_core::LdtkCorePlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LdtkAssetsPlugin)
///     .add_plugins(LdtkCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct LdtkCorePlugin {
    config: LdtkCoreConfig,
}

impl LdtkCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: LdtkCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LdtkCorePlugin {
    fn build(&self, app: &mut App) {
        // Built from inventory here unless `register_ldtk_entity` already created it
        app.init_resource::<LdtkEntityRegistry>();

        app.insert_resource(self.config.clone());
        app.init_resource::<LayerZConfig>();

        app.register_type::<LdtkSceneRoot>()
            .register_type::<LdtkProject>()
            .register_type::<LdtkSimplifiedLevel>()
            .register_type::<LdtkSimplifiedWorld>()
            .register_type::<LevelSelection>()
            .register_type::<LdtkLevel>()
            .register_type::<LevelGeometry>()
            .register_type::<LevelBackground>()
            .register_type::<CompositeImage>()
            .register_type::<LdtkLayer>()
            .register_type::<LayerIid>()
            .register_type::<LayerGeometry>()
            .register_type::<IntGridData>()
            .register_type::<TileLayerData>()
            .register_type::<LdtkEntity>();

        // Hot reload marks roots before they are processed in the same frame
        app.add_systems(
            PreUpdate,
            (
                mark_modified_assets_for_respawn,
                process_loaded_projects,
                process_loaded_simplified_levels,
                process_loaded_simplified_worlds,
            )
                .chain(),
        );

        // Only runs when the DebugLevelGeometry resource is present
        app.add_systems(
            PostUpdate,
            draw_level_geometry_debug.run_if(resource_exists::<DebugLevelGeometry>),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_z() {
        let config = LayerZConfig {
            offset: 10.0,
            multiplier: 2.0,
        };
        assert_eq!(config.z_for(0), 10.0);
        assert_eq!(config.z_for(3), 16.0);
    }

    #[test]
    fn test_default_config() {
        let config = LdtkCoreConfig::default();
        assert!(config.warn_unmapped_entities);
        assert!(!config.spawn_hidden_layers);
        assert_eq!(config.simplified_grid_size, 16);
    }
}
