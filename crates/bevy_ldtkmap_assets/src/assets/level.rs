use bevy::prelude::*;

use crate::json::Level;

/// Bevy asset wrapper for an external LDtk level (`.ldtkl` file).
///
/// Projects saved with "Save levels to separate files" keep only level
/// metadata in the `.ldtk`; the layers of each level live in one of these.
#[derive(TypePath, Asset, Debug)]
pub struct LdtkLevelAsset {
    /// The raw level data (PRESERVE AS-IS)
    pub level: Level,
}
