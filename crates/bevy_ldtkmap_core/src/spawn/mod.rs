//! Entity spawning logic for LDtk data.
//!
//! Traversal is level → layers → dispatch by layer type. Each function only
//! queues commands, so the whole hierarchy appears at the next command flush.

pub mod entities;
pub mod layers;
pub mod level;
pub mod project;
pub mod simplified;
pub mod tiles;

pub use entities::{spawn_entity, spawn_entity_layer};
pub use layers::spawn_layer;
pub use level::spawn_level;
pub use project::spawn_project;
pub use simplified::{spawn_simplified_level, spawn_simplified_world};
pub use tiles::build_tile_layer_data;
