//! Layer 1 of `bevy_ldtkmap`: LDtk file formats as Bevy assets.
//!
//! - [`json`]: serde model of the LDtk JSON export
//! - [`csv`]: int-grid CSV files from the "super simple export"
//! - [`assets`] / [`loaders`]: Bevy asset types and their loaders

pub mod assets;
pub mod csv;
pub mod json;
pub mod loaders;
pub mod plugin;

pub use plugin::LdtkAssetsPlugin;

/// Prelude module for convenient imports
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_assets::prelude::*;
///
/// fn my_system(projects: Res<Assets<LdtkProjectAsset>>) {
///     for (_, project) in projects.iter() {
///         info!("{} levels", project.level_count());
///     }
/// }
/// ```
pub mod prelude {
    pub use crate::assets::{
        level::LdtkLevelAsset,
        project::LdtkProjectAsset,
        simplified::{LdtkSimplifiedLevelAsset, SimplifiedEntity, SimplifiedLevelData},
        world::{LdtkSimplifiedWorldAsset, SimplifiedWorldLevel},
    };
    pub use crate::csv::{IntGridCsv, parse_int_grid_csv};
    pub use crate::json::{
        EntityInstance, FieldInstance, LayerInstance, LayerType, LdtkJson, Level, TileInstance,
    };
    pub use crate::plugin::LdtkAssetsPlugin;
}
