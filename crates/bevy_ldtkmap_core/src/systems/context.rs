//! Spawn context shared by the spawning functions.

use crate::plugin::{LayerZConfig, LdtkCoreConfig};
use crate::registry::LdtkEntityRegistry;

/// Read-only context for spawning.
///
/// Used internally by the spawning system. Not passed to Layer 3 events.
pub struct SpawnContext<'a> {
    /// Entity identifier bindings
    pub registry: &'a LdtkEntityRegistry,

    pub config: &'a LdtkCoreConfig,

    pub z_config: &'a LayerZConfig,
}

impl<'a> SpawnContext<'a> {
    pub fn new(
        registry: &'a LdtkEntityRegistry,
        config: &'a LdtkCoreConfig,
        z_config: &'a LayerZConfig,
    ) -> Self {
        Self {
            registry,
            config,
            z_config,
        }
    }
}
