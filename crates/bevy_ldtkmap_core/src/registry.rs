//! Entity registry: what to attach to each LDtk entity identifier.
//!
//! Two sources feed it:
//! - types with `#[derive(LdtkFields)]` and `#[ldtk(entity = "...")]`,
//!   collected at compile time with the inventory crate
//! - handler functions registered at runtime with
//!   [`LdtkEntityAppExt::register_ldtk_entity`]

use std::collections::HashMap;

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::components::LdtkEntity;
use crate::fields::{FieldError, LdtkFields};

/// Information about a component type bound to an LDtk entity identifier.
///
/// This struct is submitted via `inventory::submit!` by the `LdtkFields` derive macro.
pub struct LdtkEntityInfo {
    /// LDtk entity identifier (e.g. `"Door"`)
    pub identifier: &'static str,

    /// Rust type name, for logs
    pub type_name: &'static str,

    /// Build the component from the entity's fields and insert it.
    pub insert: fn(&mut EntityCommands, &LdtkFields) -> Result<(), FieldError>,
}

// Collect all LdtkEntityInfo submissions at compile time
inventory::collect!(LdtkEntityInfo);

/// Runtime handler for an LDtk entity identifier.
///
/// Called once per spawned entity with that identifier, after the generic
/// components are inserted.
pub type LdtkEntityHandler = fn(&mut EntityCommands, &LdtkEntity, &LdtkFields);

/// Registry of everything bound to LDtk entity identifiers.
///
/// # Example
///
/// ```ignore
/// fn my_system(registry: Res<LdtkEntityRegistry>) {
///     if !registry.is_mapped("Enemy") {
///         warn!("Enemies will spawn without gameplay components");
///     }
/// }
/// ```
#[derive(Resource)]
pub struct LdtkEntityRegistry {
    components: HashMap<String, Vec<&'static LdtkEntityInfo>>,
    handlers: HashMap<String, Vec<LdtkEntityHandler>>,
}

impl Default for LdtkEntityRegistry {
    fn default() -> Self {
        Self::build()
    }
}

impl LdtkEntityRegistry {
    /// Build the registry from all inventory submissions.
    pub fn build() -> Self {
        let mut components: HashMap<String, Vec<&'static LdtkEntityInfo>> = HashMap::new();

        for info in inventory::iter::<LdtkEntityInfo> {
            components
                .entry(info.identifier.to_string())
                .or_default()
                .push(info);
        }

        debug!(
            "LdtkEntityRegistry built with {} registered entity identifiers",
            components.len()
        );

        Self {
            components,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for an entity identifier.
    pub fn register_handler(&mut self, identifier: impl Into<String>, handler: LdtkEntityHandler) {
        self.handlers
            .entry(identifier.into())
            .or_default()
            .push(handler);
    }

    /// Component types bound to this identifier.
    pub fn components_for(&self, identifier: &str) -> &[&'static LdtkEntityInfo] {
        self.components
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Handlers registered for this identifier.
    pub fn handlers_for(&self, identifier: &str) -> &[LdtkEntityHandler] {
        self.handlers
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether anything is bound to this identifier.
    pub fn is_mapped(&self, identifier: &str) -> bool {
        !self.components_for(identifier).is_empty() || !self.handlers_for(identifier).is_empty()
    }

    /// Iterate all identifiers with at least one binding.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        let mut identifiers: Vec<&str> = self
            .components
            .keys()
            .chain(self.handlers.keys())
            .map(String::as_str)
            .collect();
        identifiers.sort_unstable();
        identifiers.dedup();
        identifiers.into_iter()
    }
}

/// Extension trait to bind LDtk entity identifiers from `App`.
pub trait LdtkEntityAppExt {
    /// Call `handler` for every spawned entity with this identifier.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use bevy::prelude::*;
    /// # use bevy::ecs::system::EntityCommands;
    /// # use bevy_ldtkmap_core::prelude::*;
    /// #[derive(Component)]
    /// struct Player;
    ///
    /// fn spawn_player(entity: &mut EntityCommands, _: &LdtkEntity, _: &LdtkFields) {
    ///     entity.insert(Player);
    /// }
    ///
    /// App::new().register_ldtk_entity("Player", spawn_player);
    /// ```
    fn register_ldtk_entity(
        &mut self,
        identifier: impl Into<String>,
        handler: LdtkEntityHandler,
    ) -> &mut Self;
}

impl LdtkEntityAppExt for App {
    fn register_ldtk_entity(
        &mut self,
        identifier: impl Into<String>,
        handler: LdtkEntityHandler,
    ) -> &mut Self {
        self.world_mut()
            .get_resource_or_init::<LdtkEntityRegistry>()
            .register_handler(identifier, handler);
        self
    }
}
