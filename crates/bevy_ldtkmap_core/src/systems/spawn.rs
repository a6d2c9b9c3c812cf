//! Main reactive spawning systems.

use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::prelude::*;
use bevy_ldtkmap_assets::prelude::{
    LdtkLevelAsset, LdtkProjectAsset, LdtkSimplifiedLevelAsset, LdtkSimplifiedWorldAsset,
};

use crate::components::{
    LayersInLevel, LdtkProject, LdtkSimplifiedLevel, LdtkSimplifiedWorld, LevelSelection,
    LevelsInProject,
};
use crate::events::ProjectSpawned;
use crate::plugin::{LayerZConfig, LdtkCoreConfig};
use crate::registry::LdtkEntityRegistry;
use crate::spawn::{spawn_project, spawn_simplified_level, spawn_simplified_world};
use crate::systems::SpawnContext;

/// Marker component to trigger respawning of an LDtk root.
///
/// Works on `LdtkProject`, `LdtkSimplifiedLevel` and `LdtkSimplifiedWorld`
/// entities. Everything
/// previously spawned under the root is despawned first. Added automatically
/// when the underlying asset is hot-reloaded.
#[derive(Component, Default)]
pub struct RespawnLdtk;

/// Whether a root asset can be spawned yet.
#[derive(Debug, PartialEq, Eq)]
enum Readiness {
    Ready,
    /// Spawn what is available
    DependenciesFailed,
    Pending,
}

fn readiness<A: Asset>(
    asset_server: &AssetServer,
    assets: &Assets<A>,
    handle: &Handle<A>,
) -> Readiness {
    match asset_server.get_recursive_dependency_load_state(handle) {
        Some(RecursiveDependencyLoadState::Loaded) => Readiness::Ready,
        Some(RecursiveDependencyLoadState::Failed(_)) => Readiness::DependenciesFailed,
        // Added with `Assets::add` instead of loaded: nothing to wait for
        None if assets.contains(handle) => Readiness::Ready,
        _ => Readiness::Pending,
    }
}

fn is_loaded(asset_server: &AssetServer, image: &Handle<Image>) -> bool {
    matches!(asset_server.get_load_state(image), Some(LoadState::Loaded))
}

/// Reactive system that spawns projects once their assets are fully loaded.
///
/// Runs in `PreUpdate` before user systems. Failed dependencies (a missing
/// tileset image or external level) are logged and the rest is spawned.
///
/// # Triggers
///
/// - Project entities that haven't been spawned yet (no `LevelsInProject`)
/// - `With<RespawnLdtk>` - When respawn is requested or the asset was reloaded
pub fn process_loaded_projects(
    asset_server: Res<AssetServer>,
    project_assets: Res<Assets<LdtkProjectAsset>>,
    level_assets: Res<Assets<LdtkLevelAsset>>,
    registry: Res<LdtkEntityRegistry>,
    config: Res<LdtkCoreConfig>,
    z_config: Res<LayerZConfig>,
    mut commands: Commands,
    project_query: Query<
        (
            Entity,
            &LdtkProject,
            Option<&LevelSelection>,
            Has<LevelsInProject>,
        ),
        Or<(Without<LevelsInProject>, With<RespawnLdtk>)>,
    >,
) {
    for (project_entity, project, selection, already_spawned) in &project_query {
        let dependencies_failed =
            match readiness(&asset_server, &project_assets, &project.handle) {
                Readiness::Ready => false,
                Readiness::DependenciesFailed => true,
                Readiness::Pending => continue,
            };

        // The .ldtk itself failed: the loader error is already logged
        let Some(project_asset) = project_assets.get(&project.handle) else {
            continue;
        };

        if dependencies_failed {
            warn!(
                "Some dependencies of project {:?} failed to load, spawning what is available",
                project_entity
            );
        }

        let project_name = asset_server
            .get_path(&project.handle)
            .and_then(|p| {
                p.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Project".to_string());

        if already_spawned {
            info!("Respawning project '{}'", project_name);
            commands.entity(project_entity).despawn_related::<Children>();
        }

        commands
            .entity(project_entity)
            .insert(Name::new(format!("Project: {}", project_name)));

        let context = SpawnContext::new(&registry, &config, &z_config);
        let default_selection = LevelSelection::default();
        let levels = spawn_project(
            &mut commands,
            project_entity,
            project_asset,
            &level_assets,
            selection.unwrap_or(&default_selection),
            &context,
        );

        info!(
            "Spawned project '{}' ({} of {} levels)",
            project_name,
            levels.len(),
            project_asset.level_count()
        );

        commands
            .entity(project_entity)
            .trigger(|entity| ProjectSpawned { entity });

        commands.entity(project_entity).remove::<RespawnLdtk>();
    }
}

/// Reactive system that spawns simplified levels once their assets are loaded.
///
/// A failed composite image doesn't block spawning: the level is spawned
/// without it.
pub fn process_loaded_simplified_levels(
    asset_server: Res<AssetServer>,
    level_assets: Res<Assets<LdtkSimplifiedLevelAsset>>,
    registry: Res<LdtkEntityRegistry>,
    config: Res<LdtkCoreConfig>,
    z_config: Res<LayerZConfig>,
    mut commands: Commands,
    level_query: Query<
        (Entity, &LdtkSimplifiedLevel, &Transform, Has<LayersInLevel>),
        Or<(Without<LayersInLevel>, With<RespawnLdtk>)>,
    >,
) {
    for (level_entity, level, transform, already_spawned) in &level_query {
        if readiness(&asset_server, &level_assets, &level.handle) == Readiness::Pending {
            continue;
        }

        // data.json itself failed: the loader error is already logged
        let Some(level_asset) = level_assets.get(&level.handle) else {
            continue;
        };

        let composite_loaded = is_loaded(&asset_server, &level_asset.composite);

        if already_spawned {
            info!("Respawning level '{}'", level_asset.data.identifier);
            commands.entity(level_entity).despawn_related::<Children>();
        }

        let context = SpawnContext::new(&registry, &config, &z_config);
        spawn_simplified_level(
            &mut commands,
            level_entity,
            level_asset,
            composite_loaded,
            transform,
            &mut 0,
            &context,
        );

        info!("Spawned level '{}'", level_asset.data.identifier);

        commands.entity(level_entity).remove::<RespawnLdtk>();
    }
}

/// Reactive system that spawns simplified worlds once their levels are loaded.
///
/// Levels whose `data.json` failed are skipped; the rest of the world is
/// spawned, with entity names numbered across all of its levels.
pub fn process_loaded_simplified_worlds(
    asset_server: Res<AssetServer>,
    world_assets: Res<Assets<LdtkSimplifiedWorldAsset>>,
    level_assets: Res<Assets<LdtkSimplifiedLevelAsset>>,
    registry: Res<LdtkEntityRegistry>,
    config: Res<LdtkCoreConfig>,
    z_config: Res<LayerZConfig>,
    mut commands: Commands,
    world_query: Query<
        (Entity, &LdtkSimplifiedWorld, Has<LevelsInProject>),
        Or<(Without<LevelsInProject>, With<RespawnLdtk>)>,
    >,
) {
    for (world_entity, world, already_spawned) in &world_query {
        let dependencies_failed = match readiness(&asset_server, &world_assets, &world.handle) {
            Readiness::Ready => false,
            Readiness::DependenciesFailed => true,
            Readiness::Pending => continue,
        };

        // The .ldtk itself failed: the loader error is already logged
        let Some(world_asset) = world_assets.get(&world.handle) else {
            continue;
        };

        if dependencies_failed {
            warn!(
                "Some levels of world {:?} failed to load, spawning what is available",
                world_entity
            );
        }

        if already_spawned {
            info!("Respawning world {:?}", world_entity);
            commands.entity(world_entity).despawn_related::<Children>();
        }

        let context = SpawnContext::new(&registry, &config, &z_config);
        let levels = spawn_simplified_world(
            &mut commands,
            world_entity,
            world_asset,
            &level_assets,
            |image| is_loaded(&asset_server, image),
            &context,
        );

        info!(
            "Spawned simplified world ({} of {} levels)",
            levels.len(),
            world_asset.level_count()
        );

        commands
            .entity(world_entity)
            .trigger(|entity| ProjectSpawned { entity });

        commands.entity(world_entity).remove::<RespawnLdtk>();
    }
}

/// Hot reload: mark roots whose asset (or one of its levels) was modified.
pub fn mark_modified_assets_for_respawn(
    mut project_events: MessageReader<AssetEvent<LdtkProjectAsset>>,
    mut level_events: MessageReader<AssetEvent<LdtkLevelAsset>>,
    mut simplified_events: MessageReader<AssetEvent<LdtkSimplifiedLevelAsset>>,
    mut world_events: MessageReader<AssetEvent<LdtkSimplifiedWorldAsset>>,
    project_assets: Res<Assets<LdtkProjectAsset>>,
    world_assets: Res<Assets<LdtkSimplifiedWorldAsset>>,
    projects: Query<(Entity, &LdtkProject), With<LevelsInProject>>,
    simplified_levels: Query<(Entity, &LdtkSimplifiedLevel), With<LayersInLevel>>,
    simplified_worlds: Query<(Entity, &LdtkSimplifiedWorld), With<LevelsInProject>>,
    mut commands: Commands,
) {
    let modified_projects: Vec<AssetId<LdtkProjectAsset>> = project_events
        .read()
        .filter_map(|event| match event {
            AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    let modified_levels: Vec<AssetId<LdtkLevelAsset>> = level_events
        .read()
        .filter_map(|event| match event {
            AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    let modified_simplified: Vec<AssetId<LdtkSimplifiedLevelAsset>> = simplified_events
        .read()
        .filter_map(|event| match event {
            AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    for (entity, project) in &projects {
        let project_id = project.handle.id();
        let uses_modified_level = project_assets.get(project_id).is_some_and(|asset| {
            asset
                .external_levels
                .values()
                .any(|handle| modified_levels.contains(&handle.id()))
        });

        if modified_projects.contains(&project_id) || uses_modified_level {
            debug!("Project {:?} modified, marking for respawn", entity);
            commands.entity(entity).insert(RespawnLdtk);
        }
    }

    let modified_worlds: Vec<AssetId<LdtkSimplifiedWorldAsset>> = world_events
        .read()
        .filter_map(|event| match event {
            AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    for (entity, level) in &simplified_levels {
        if modified_simplified.contains(&level.handle.id()) {
            debug!("Level {:?} modified, marking for respawn", entity);
            commands.entity(entity).insert(RespawnLdtk);
        }
    }

    for (entity, world) in &simplified_worlds {
        let world_id = world.handle.id();
        let uses_modified_level = world_assets.get(world_id).is_some_and(|asset| {
            asset
                .levels
                .iter()
                .any(|level| modified_simplified.contains(&level.handle.id()))
        });

        if modified_worlds.contains(&world_id) || uses_modified_level {
            debug!("World {:?} modified, marking for respawn", entity);
            commands.entity(entity).insert(RespawnLdtk);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;
    use bevy::platform::collections::HashMap;
    use bevy_ldtkmap_assets::LdtkAssetsPlugin;
    use bevy_ldtkmap_assets::json::{EntityInstance, LayerInstance, LayerType, LdtkJson, Level};
    use bevy_ldtkmap_assets::prelude::{
        SimplifiedEntity, SimplifiedLevelData, SimplifiedWorldLevel,
    };

    use super::*;
    use crate::components::{LdtkEntity, LdtkLevel};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), LdtkAssetsPlugin))
            .init_resource::<LdtkEntityRegistry>()
            .insert_resource(LdtkCoreConfig {
                warn_unmapped_entities: false,
                ..default()
            })
            .init_resource::<LayerZConfig>()
            .add_systems(
                Update,
                (
                    mark_modified_assets_for_respawn,
                    process_loaded_projects,
                    process_loaded_simplified_levels,
                    process_loaded_simplified_worlds,
                )
                    .chain(),
            );
        app
    }

    fn level(identifier: &str) -> Level {
        let mut entities = LayerInstance {
            identifier: "Entities".to_string(),
            layer_type: LayerType::Entities,
            c_wid: 4,
            c_hei: 4,
            grid_size: 16,
            opacity: 1.0,
            visible: true,
            ..default()
        };
        entities.entity_instances.push(EntityInstance {
            identifier: "Player".to_string(),
            iid: format!("{identifier}-player"),
            px: [16, 16],
            width: 16,
            height: 16,
            ..default()
        });

        Level {
            identifier: identifier.to_string(),
            iid: format!("{identifier}-iid"),
            px_wid: 64,
            px_hei: 64,
            layer_instances: Some(vec![entities]),
            ..default()
        }
    }

    fn project_asset() -> LdtkProjectAsset {
        LdtkProjectAsset {
            project: LdtkJson {
                levels: vec![level("Level_0"), level("Level_1")],
                ..default()
            },
            tileset_images: HashMap::default(),
            external_levels: HashMap::default(),
        }
    }

    fn simplified_asset(identifier: &str, entity_ids: &[&str]) -> LdtkSimplifiedLevelAsset {
        let entities = entity_ids
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    vec![SimplifiedEntity {
                        id: id.to_string(),
                        width: 16,
                        height: 16,
                        ..default()
                    }],
                )
            })
            .collect();

        LdtkSimplifiedLevelAsset {
            data: SimplifiedLevelData {
                identifier: identifier.to_string(),
                width: 64,
                height: 64,
                entities,
                ..default()
            },
            composite: Handle::default(),
            collisions: None,
        }
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&C>().iter(world).count()
    }

    fn levels_of(app: &App, root: Entity) -> Vec<Entity> {
        app.world().get::<LevelsInProject>(root).unwrap().0.clone()
    }

    fn entity_names(app: &mut App) -> Vec<String> {
        let world = app.world_mut();
        let mut names: Vec<String> = world
            .query_filtered::<&Name, With<LdtkEntity>>()
            .iter(world)
            .map(|name| name.as_str().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_project_spawns_once_loaded() {
        let mut app = app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkProjectAsset>>()
            .add(project_asset());
        let project = app.world_mut().spawn(LdtkProject { handle }).id();

        app.update();

        assert_eq!(levels_of(&app, project).len(), 2);
        assert_eq!(count::<LdtkLevel>(&mut app), 2);
        assert_eq!(count::<LdtkEntity>(&mut app), 2);

        // Nothing to do until a respawn is requested
        app.update();
        assert_eq!(count::<LdtkLevel>(&mut app), 2);
    }

    #[test]
    fn test_project_selection() {
        let mut app = app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkProjectAsset>>()
            .add(project_asset());
        app.world_mut()
            .spawn((LdtkProject { handle }, LevelSelection::identifier("Level_1")));

        app.update();

        let world = app.world_mut();
        let identifiers: Vec<String> = world
            .query::<&LdtkLevel>()
            .iter(world)
            .map(|level| level.identifier.clone())
            .collect();
        assert_eq!(identifiers, ["Level_1"]);
    }

    #[test]
    fn test_respawn_replaces_previous_hierarchy() {
        let mut app = app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkProjectAsset>>()
            .add(project_asset());
        let project = app.world_mut().spawn(LdtkProject { handle }).id();
        app.update();
        let old_levels = levels_of(&app, project);

        app.world_mut().entity_mut(project).insert(RespawnLdtk);
        app.update();

        let new_levels = levels_of(&app, project);
        assert_eq!(new_levels.len(), 2);
        assert_ne!(new_levels, old_levels);
        for old in old_levels {
            assert!(app.world().get_entity(old).is_err());
        }
        assert_eq!(count::<LdtkLevel>(&mut app), 2);
        assert_eq!(count::<LdtkEntity>(&mut app), 2);
        assert!(app.world().get::<RespawnLdtk>(project).is_none());
    }

    #[test]
    fn test_modified_project_is_respawned() {
        let mut app = app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkProjectAsset>>()
            .add(project_asset());
        let project = app
            .world_mut()
            .spawn(LdtkProject {
                handle: handle.clone(),
            })
            .id();
        app.update();
        let old_levels = levels_of(&app, project);

        {
            let mut projects = app.world_mut().resource_mut::<Assets<LdtkProjectAsset>>();
            let asset = projects.get_mut(&handle).unwrap();
            asset.project.levels.pop();
        }
        // One frame to send the asset event, one to react to it
        app.update();
        app.update();

        let new_levels = levels_of(&app, project);
        assert_eq!(new_levels.len(), 1);
        assert!(app.world().get_entity(old_levels[0]).is_err());
        assert_eq!(count::<LdtkLevel>(&mut app), 1);
    }

    #[test]
    fn test_missing_project_file_spawns_nothing() {
        let mut app = app();
        let handle: Handle<LdtkProjectAsset> = app
            .world()
            .resource::<AssetServer>()
            .load("does_not_exist.ldtk");
        let project = app
            .world_mut()
            .spawn(LdtkProject {
                handle: handle.clone(),
            })
            .id();

        for _ in 0..200 {
            app.update();
            let state = app.world().resource::<AssetServer>().get_load_state(&handle);
            if matches!(state, Some(LoadState::Failed(_))) {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        app.update();

        assert!(matches!(
            app.world().resource::<AssetServer>().get_load_state(&handle),
            Some(LoadState::Failed(_))
        ));
        assert!(app.world().get::<LevelsInProject>(project).is_none());
        assert_eq!(count::<LdtkLevel>(&mut app), 0);
    }

    #[test]
    fn test_simplified_level_spawn_and_hot_reload() {
        let mut app = app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkSimplifiedLevelAsset>>()
            .add(simplified_asset("Level_0", &["Player", "Chest"]));
        let level = app
            .world_mut()
            .spawn(LdtkSimplifiedLevel {
                handle: handle.clone(),
            })
            .id();

        app.update();

        let old_layers = app.world().get::<LayersInLevel>(level).unwrap().0.clone();
        assert_eq!(old_layers.len(), 1);
        assert_eq!(entity_names(&mut app), ["LDtk_Chest_1", "LDtk_Player_0"]);

        {
            let mut levels = app
                .world_mut()
                .resource_mut::<Assets<LdtkSimplifiedLevelAsset>>();
            let asset = levels.get_mut(&handle).unwrap();
            asset.data.entities.truncate(1);
        }
        app.update();
        app.update();

        assert!(app.world().get_entity(old_layers[0]).is_err());
        assert_eq!(entity_names(&mut app), ["LDtk_Player_0"]);
        assert_eq!(count::<LdtkEntity>(&mut app), 1);
    }

    #[test]
    fn test_simplified_world_spawns_every_level() {
        let mut app = app();
        let (first, second) = {
            let mut levels = app
                .world_mut()
                .resource_mut::<Assets<LdtkSimplifiedLevelAsset>>();
            (
                levels.add(simplified_asset("Level_0", &["Player", "Chest"])),
                levels.add(simplified_asset("Level_1", &["Chest"])),
            )
        };
        let world_asset = LdtkSimplifiedWorldAsset {
            levels: vec![
                SimplifiedWorldLevel {
                    identifier: "Level_0".to_string(),
                    handle: first,
                },
                // Listed in the project but never exported
                SimplifiedWorldLevel {
                    identifier: "Level_2".to_string(),
                    handle: Handle::default(),
                },
                SimplifiedWorldLevel {
                    identifier: "Level_1".to_string(),
                    handle: second.clone(),
                },
            ],
        };
        let handle = app
            .world_mut()
            .resource_mut::<Assets<LdtkSimplifiedWorldAsset>>()
            .add(world_asset);
        let root = app.world_mut().spawn(LdtkSimplifiedWorld { handle }).id();

        app.update();

        let old_levels = levels_of(&app, root);
        assert_eq!(old_levels.len(), 2);
        assert_eq!(
            entity_names(&mut app),
            ["LDtk_Chest_1", "LDtk_Chest_2", "LDtk_Player_0"]
        );

        // Editing one level respawns the whole world
        {
            let mut levels = app
                .world_mut()
                .resource_mut::<Assets<LdtkSimplifiedLevelAsset>>();
            let asset = levels.get_mut(&second).unwrap();
            asset.data.entities.push((
                "Door".to_string(),
                vec![SimplifiedEntity {
                    id: "Door".to_string(),
                    ..default()
                }],
            ));
        }
        app.update();
        app.update();

        assert_eq!(levels_of(&app, root).len(), 2);
        assert!(app.world().get_entity(old_levels[0]).is_err());
        assert_eq!(
            entity_names(&mut app),
            ["LDtk_Chest_1", "LDtk_Chest_2", "LDtk_Door_3", "LDtk_Player_0"]
        );
    }
}
