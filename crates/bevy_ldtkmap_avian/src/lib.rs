//! `Avian2D` physics integration for `bevy_ldtkmap`.
//!
//! This crate provides automatic collider generation from LDtk levels using the `Avian2D` physics engine.
//!
//! # Features
//!
//! - **Int-Grid Colliders**: Solid int-grid cells become colliders, merged into rectangles
//! - **Entity Colliders**: Opt-in rectangle colliders sized to the entity box
//! - **Field-Based Configuration**: Configure physics parameters via `PhysicsSettings` entity fields
//! - **Collision Layers**: User-provided callback for converting string collision groups to Avian's `CollisionLayers`
//! - **Multiple Strategies**: Choose between `PerCell` or `CompoundMerged` for int-grid colliders
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap_avian::LdtkAvianPlugin;
//! use avian2d::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(PhysicsPlugins::default())
//!     .add_plugins(LdtkAvianPlugin::default())
//!     .run();
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_ldtkmap_avian::{BodyType, LdtkAvianPlugin, PhysicsConfig};
//! use avian2d::prelude::*;
//!
//! fn parse_collision_layers(groups: &str, mask: &str) -> CollisionLayers {
//!     // Parse comma-separated strings into Avian's CollisionLayers
//!     // ... implementation ...
//!     CollisionLayers::default()
//! }
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(PhysicsPlugins::default())
//!     .add_plugins(LdtkAvianPlugin::new(
//!         PhysicsConfig::default()
//!             .with_solid_values([1, 2])
//!             .with_entity_body("Player", BodyType::Dynamic)
//!             .with_collision_layers_fn(parse_collision_layers),
//!     ))
//!     .run();
//! ```

pub mod config;
pub mod entities;
pub mod int_grid;
pub mod plugin;
pub mod properties;

pub mod prelude {
    //! Common imports for `bevy_ldtkmap_avian`.

    pub use crate::config::*;
    pub use crate::plugin::LdtkAvianPlugin;
    pub use crate::properties::*;
}

// Re-export at crate root for convenience
pub use config::{IntGridColliderConfig, PhysicsConfig, TileColliderStrategy};
pub use plugin::LdtkAvianPlugin;
pub use properties::{BodyType, PhysicsSettings};
