//! Project spawning logic.

use bevy::prelude::*;
use bevy_ldtkmap_assets::prelude::{LdtkLevelAsset, LdtkProjectAsset};

use crate::components::{LevelSelection, LevelsInProject};
use crate::spawn::spawn_level;
use crate::systems::SpawnContext;

/// Spawn every selected level of a project under `project_entity`.
///
/// External levels whose `.ldtkl` isn't available are logged and skipped.
///
/// # Returns
///
/// The spawned level entities, in project order.
pub fn spawn_project(
    commands: &mut Commands,
    project_entity: Entity,
    project: &LdtkProjectAsset,
    level_assets: &Assets<LdtkLevelAsset>,
    selection: &LevelSelection,
    context: &SpawnContext,
) -> Vec<Entity> {
    let mut level_entities = Vec::new();

    for (index, level) in project.project.levels.iter().enumerate() {
        if !selection.is_selected(index, &level.identifier) {
            continue;
        }

        let Some(level_data) = project.resolve_level(level, level_assets) else {
            warn!(
                "Level '{}' has no layer data (external level not loaded), skipping",
                level.identifier
            );
            continue;
        };

        let level_entity = spawn_level(commands, project_entity, project, level_data, context);
        level_entities.push(level_entity);
    }

    commands
        .entity(project_entity)
        .insert(LevelsInProject(level_entities.clone()))
        .add_children(&level_entities);

    level_entities
}
