//! Reactive spawning systems.

pub mod context;
pub mod spawn;

pub use context::SpawnContext;
pub use spawn::{
    RespawnLdtk, mark_modified_assets_for_respawn, process_loaded_projects,
    process_loaded_simplified_levels, process_loaded_simplified_worlds,
};
