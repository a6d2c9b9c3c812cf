//! Observer for composite image spawning events.

use bevy::prelude::*;
use bevy_ldtkmap_core::components::CompositeImage;
use bevy_ldtkmap_core::events::CompositeSpawned;

/// Observer that renders the composite image of a simplified level.
///
/// The composite entity is already centred on its level, so the sprite keeps
/// the default center anchor and is sized to the level.
pub fn on_composite_spawned(
    trigger: On<CompositeSpawned>,
    composite_query: Query<&CompositeImage>,
    mut commands: Commands,
) {
    let event = trigger.event();

    let Ok(composite) = composite_query.get(event.entity) else {
        warn!(
            "CompositeSpawned event for entity {:?} but no CompositeImage component found",
            event.entity
        );
        return;
    };

    commands.entity(event.entity).insert(Sprite {
        image: composite.image.clone(),
        custom_size: Some(composite.size),
        ..default()
    });
}
