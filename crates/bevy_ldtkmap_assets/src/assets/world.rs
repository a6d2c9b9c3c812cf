use bevy::prelude::*;

use crate::assets::simplified::LdtkSimplifiedLevelAsset;

/// Every level of a "super simple export", loaded through its `.ldtk` project.
///
/// Levels are listed in project order. The entity counter used to name
/// spawned entities runs across them in that order.
#[derive(TypePath, Asset, Debug)]
pub struct LdtkSimplifiedWorldAsset {
    pub levels: Vec<SimplifiedWorldLevel>,
}

/// One level folder of a simplified world.
#[derive(Debug, Clone)]
pub struct SimplifiedWorldLevel {
    /// Level identifier, also the name of its export folder
    pub identifier: String,
    pub handle: Handle<LdtkSimplifiedLevelAsset>,
}

impl LdtkSimplifiedWorldAsset {
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Handle of the level named `identifier`.
    pub fn level(&self, identifier: &str) -> Option<&Handle<LdtkSimplifiedLevelAsset>> {
        self.levels
            .iter()
            .find(|level| level.identifier == identifier)
            .map(|level| &level.handle)
    }
}
