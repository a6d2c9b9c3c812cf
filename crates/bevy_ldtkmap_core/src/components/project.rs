//! Scene root components and relationship components.

use bevy::prelude::*;
use bevy_ldtkmap_assets::prelude::{
    LdtkProjectAsset, LdtkSimplifiedLevelAsset, LdtkSimplifiedWorldAsset,
};

/// Marker component for scene roots (projects, simplified levels and worlds).
///
/// Added automatically to `LdtkProject`, `LdtkSimplifiedLevel` and
/// `LdtkSimplifiedWorld` entities, so
/// you can query for any LDtk scene root without distinguishing between them.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct LdtkSceneRoot;

/// Root component for an LDtk project.
///
/// Spawn an entity with this component to trigger project loading and level
/// hierarchy creation.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::LdtkProject;
/// fn spawn_project(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(LdtkProject {
///         handle: asset_server.load("world.ldtk"),
///     });
/// }
/// ```
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility, LdtkSceneRoot)]
pub struct LdtkProject {
    /// Handle to the loaded `LdtkProjectAsset`.
    pub handle: Handle<LdtkProjectAsset>,
}

/// Root component for one level of a "super simple export".
///
/// The entity itself becomes the level: it is translated to the level's world
/// position and gets the composite image, entities and collisions as children.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::LdtkSimplifiedLevel;
/// fn spawn_level(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(LdtkSimplifiedLevel {
///         handle: asset_server.load("world/simplified/Level_0/data.json"),
///     });
/// }
/// ```
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility, LdtkSceneRoot)]
pub struct LdtkSimplifiedLevel {
    /// Handle to the loaded `LdtkSimplifiedLevelAsset`.
    pub handle: Handle<LdtkSimplifiedLevelAsset>,
}

/// Root component for every level of a "super simple export".
///
/// Load the `.ldtk` project with this asset type: each of its levels is read
/// from `<project>/simplified/<level>/data.json` and spawned as a child of
/// this entity. Entity names share one counter across the whole world.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::LdtkSimplifiedWorld;
/// fn spawn_world(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(LdtkSimplifiedWorld {
///         handle: asset_server.load("world.ldtk"),
///     });
/// }
/// ```
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility, LdtkSceneRoot)]
pub struct LdtkSimplifiedWorld {
    /// Handle to the loaded `LdtkSimplifiedWorldAsset`.
    pub handle: Handle<LdtkSimplifiedWorldAsset>,
}

/// Which levels of a project to spawn.
///
/// Optional: a project without this component spawns every level.
#[derive(Component, Debug, Clone, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum LevelSelection {
    #[default]
    All,
    /// Levels whose identifier is in the list
    Identifiers(Vec<String>),
    /// Levels at these positions in the project's level list
    Indices(Vec<usize>),
}

impl LevelSelection {
    /// Select a single level by identifier.
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::Identifiers(vec![identifier.into()])
    }

    /// Whether the level at `index` named `identifier` is selected.
    pub fn is_selected(&self, index: usize, identifier: &str) -> bool {
        match self {
            Self::All => true,
            Self::Identifiers(identifiers) => identifiers.iter().any(|id| id == identifier),
            Self::Indices(indices) => indices.contains(&index),
        }
    }
}

// ===== RELATIONSHIP COMPONENTS =====

/// Relationship: Level → Project
///
/// Points from a level entity to its project (or simplified world) root.
/// Paired with `LevelsInProject` for bidirectional traversal.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct LdtkLevelProjectOf(pub Entity);

/// Relationship target: Project → Levels
///
/// Also present on simplified world roots once they have been spawned.
#[derive(Component, Default, Debug, Reflect)]
#[reflect(Component)]
pub struct LevelsInProject(pub Vec<Entity>);

/// Relationship: Layer → Level
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct LdtkLayerLevelOf(pub Entity);

/// Relationship target: Level → Layers
///
/// Also present on simplified level roots once they have been spawned.
#[derive(Component, Default, Debug, Reflect)]
#[reflect(Component)]
pub struct LayersInLevel(pub Vec<Entity>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_selection() {
        assert!(LevelSelection::All.is_selected(3, "Level_3"));

        let by_name = LevelSelection::identifier("Level_1");
        assert!(by_name.is_selected(7, "Level_1"));
        assert!(!by_name.is_selected(1, "Level_0"));

        let by_index = LevelSelection::Indices(vec![0, 2]);
        assert!(by_index.is_selected(2, "anything"));
        assert!(!by_index.is_selected(1, "anything"));
    }
}
