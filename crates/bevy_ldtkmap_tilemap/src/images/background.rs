//! Solid level backgrounds.

use bevy::prelude::*;
use bevy_ldtkmap_core::components::{LevelBackground, LevelGeometry};
use bevy_ldtkmap_core::events::LevelSpawned;
use bevy_ldtkmap_core::LayerZConfig;

use crate::config::TilemapRenderConfig;

/// Marks the sprite drawn behind a level's layers.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelBackgroundSprite;

/// Observer that spawns a solid background sprite under each level.
///
/// Only active with `TilemapRenderConfig::render_backgrounds`. The sprite
/// sits one layer step below the lowest layer.
pub fn on_level_spawned(
    trigger: On<LevelSpawned>,
    config: Res<TilemapRenderConfig>,
    z_config: Res<LayerZConfig>,
    level_query: Query<(&LevelBackground, &LevelGeometry)>,
    mut commands: Commands,
) {
    if !config.render_backgrounds {
        return;
    }

    let level_entity = trigger.event().entity;
    let Ok((background, geometry)) = level_query.get(level_entity) else {
        return;
    };

    commands.entity(level_entity).with_child((
        LevelBackgroundSprite,
        Name::new("Background"),
        Sprite {
            color: background.0,
            custom_size: Some(geometry.size_px),
            ..default()
        },
        Transform::from_translation(
            geometry
                .center()
                .extend(z_config.offset - z_config.multiplier),
        ),
    ));
}
