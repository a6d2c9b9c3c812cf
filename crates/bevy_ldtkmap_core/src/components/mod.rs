//! Components for the `bevy_ldtkmap_core` entity hierarchy.

pub mod entity;
pub mod layer;
pub mod level;
pub mod project;
pub mod tile;

pub use entity::LdtkEntity;
pub use layer::{IntGridData, LayerGeometry, LayerIid, LdtkLayer};
pub use level::{CompositeImage, LdtkLevel, LevelBackground, LevelGeometry};
pub use project::{
    LayersInLevel, LdtkLayerLevelOf, LdtkLevelProjectOf, LdtkProject, LdtkSceneRoot,
    LdtkSimplifiedLevel, LdtkSimplifiedWorld, LevelSelection, LevelsInProject,
};
pub use tile::{LdtkTile, TileLayerData, TilesetInfo};
