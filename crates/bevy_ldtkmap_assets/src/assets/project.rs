use bevy::{platform::collections::HashMap, prelude::*};

use crate::assets::level::LdtkLevelAsset;
use crate::json::{Level, LdtkJson};

/// Bevy asset wrapper for an LDtk project (`.ldtk` file).
#[derive(TypePath, Asset, Debug)]
pub struct LdtkProjectAsset {
    /// The raw project data (PRESERVE AS-IS)
    pub project: LdtkJson,

    // ===== BEVY ASSET REFERENCES =====
    /// Tileset atlas images
    /// Key: Tileset definition uid
    pub tileset_images: HashMap<i32, Handle<Image>>,

    /// External level files (only when `project.external_levels` is set)
    /// Key: Level iid
    pub external_levels: HashMap<String, Handle<LdtkLevelAsset>>,
}

impl LdtkProjectAsset {
    /// Number of levels in the project.
    pub fn level_count(&self) -> usize {
        self.project.levels.len()
    }

    /// Atlas image for a tileset uid, if the tileset has one.
    pub fn tileset_image(&self, tileset_uid: i32) -> Option<&Handle<Image>> {
        self.tileset_images.get(&tileset_uid)
    }

    /// Resolve the full data for a level.
    ///
    /// Inline levels are returned as-is. For external levels the `.ldtkl`
    /// asset is looked up; `None` if it has not finished loading.
    pub fn resolve_level<'a>(
        &'a self,
        level: &'a Level,
        level_assets: &'a Assets<LdtkLevelAsset>,
    ) -> Option<&'a Level> {
        if level.layer_instances.is_some() {
            return Some(level);
        }
        let handle = self.external_levels.get(&level.iid)?;
        level_assets.get(handle).map(|asset| &asset.level)
    }
}
