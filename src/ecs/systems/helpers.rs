//! Shared helpers used across the overworld subsystems.

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;

use crate::ecs::resources::{EventLog, TickState};
use crate::error::SubsystemError;
use crate::model::EventKind;

/// Fail the pass if a resource the subsystem writes to is missing.
pub(crate) fn require<R: Resource>(world: &World, name: &'static str) -> Result<(), SubsystemError> {
    if world.contains_resource::<R>() {
        Ok(())
    } else {
        Err(SubsystemError::MissingResource(name))
    }
}

/// Current tick, or 0 before the tick state exists.
pub(crate) fn current_tick(world: &World) -> u64 {
    world
        .get_resource::<TickState>()
        .map(|t| t.current_tick)
        .unwrap_or(0)
}

/// Sort key placing entities in spawn order.
///
/// `Ord for Entity` compares the raw bits, which run newest-first.
pub(crate) fn creation_order(entity: Entity) -> impl Ord {
    entity.index()
}

pub(crate) fn sort_by_creation(entities: &mut [Entity]) {
    entities.sort_by_key(|e| creation_order(*e));
}

/// All entities carrying `C`, oldest first.
pub(crate) fn sorted_entities<C: Component>(world: &mut World) -> Vec<Entity> {
    let mut entities: Vec<Entity> = world
        .query_filtered::<Entity, With<C>>()
        .iter(world)
        .collect();
    sort_by_creation(&mut entities);
    entities
}

/// Append to the journal. Silently dropped when no log is installed.
pub(crate) fn log_event(
    world: &mut World,
    kind: EventKind,
    tick: u64,
    entity: Option<Entity>,
    description: String,
    data: serde_json::Value,
) {
    if let Some(mut log) = world.get_resource_mut::<EventLog>() {
        log.record(kind, tick, entity, description, data);
    }
}
