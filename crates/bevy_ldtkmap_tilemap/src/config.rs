//! Configuration for tilemap rendering.

use bevy::prelude::*;

/// Configuration for tilemap rendering plugin.
#[derive(Resource, Clone, Debug)]
pub struct TilemapRenderConfig {
    /// Draw each level's background color behind its layers (default: true)
    pub render_backgrounds: bool,

    /// Z distance between the stacked tilemaps of one layer (default: 0.01)
    ///
    /// Keep it below `LayerZConfig::multiplier` divided by the deepest stack,
    /// or sub-layers will draw over the next layer.
    pub sublayer_z_step: f32,
}

impl Default for TilemapRenderConfig {
    fn default() -> Self {
        Self {
            render_backgrounds: true,
            sublayer_z_step: 0.01,
        }
    }
}
