use bevy::prelude::*;

use crate::assets::{
    level::LdtkLevelAsset, project::LdtkProjectAsset, simplified::LdtkSimplifiedLevelAsset,
    world::LdtkSimplifiedWorldAsset,
};
use crate::loaders::{
    level::LdtkLevelLoader, project::LdtkProjectLoader, simplified::LdtkSimplifiedLevelLoader,
    world::LdtkSimplifiedWorldLoader,
};

/// Plugin that registers all LDtk asset types and loaders
///
/// This plugin enables loading LDtk exports as Bevy assets:
/// - `.ldtk` projects ([`LdtkProjectAsset`])
/// - `.ldtkl` external levels ([`LdtkLevelAsset`])
/// - `data.json` levels from the "super simple export" ([`LdtkSimplifiedLevelAsset`])
/// - every simplified level of a `.ldtk` project at once ([`LdtkSimplifiedWorldAsset`])
///
/// The last two register no file extension and are chosen from the requested
/// asset type.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_assets::LdtkAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LdtkAssetsPlugin)
///     .run();
/// ```
///
/// # What this plugin does NOT do
///
/// - Entity spawning (that's Layer 2 - `bevy_ldtkmap_core`)
/// - Rendering (that's Layer 3 - `bevy_ldtkmap_tilemap`)
/// - Physics integration (that's Layer 3 - `bevy_ldtkmap_avian`)
///
/// This is a **Layer 1** plugin: pure asset loading with no ECS concerns.
pub struct LdtkAssetsPlugin;

impl Plugin for LdtkAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LdtkProjectAsset>()
            .init_asset::<LdtkLevelAsset>()
            .init_asset::<LdtkSimplifiedLevelAsset>()
            .init_asset::<LdtkSimplifiedWorldAsset>();

        app.register_asset_loader(LdtkProjectLoader)
            .register_asset_loader(LdtkLevelLoader)
            .register_asset_loader(LdtkSimplifiedLevelLoader)
            .register_asset_loader(LdtkSimplifiedWorldLoader);
    }
}
