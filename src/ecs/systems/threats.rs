//! Threat node lifecycle: creation, per-tick growth, evolution and its
//! type-specific effects, destruction.

use bevy_app::{App, Plugin};
use bevy_ecs::change_detection::Mut;
use bevy_ecs::entity::Entity;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};
use bevy_ecs::world::World;
use serde_json::json;

use crate::ecs::components::{Influence, InfluenceInteractions, ThreatNode};
use crate::ecs::resources::{EventLog, OverworldRng, SimulationConfig, ThreatIndex};
use crate::ecs::schedule::{OverworldPhase, OverworldTick};
use crate::ecs::tick::{PlayerPresence, record_failure};
use crate::error::{SubsystemError, TickError};
use crate::model::{EventKind, ThreatType, TilePos};

use super::helpers::{current_tick, log_event, require, sorted_entities};

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct ThreatsPlugin;

impl Plugin for ThreatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OverworldTick,
            contain_threats.in_set(OverworldPhase::Containment),
        );
        app.add_systems(OverworldTick, grow_threats.in_set(OverworldPhase::Threats));
    }
}

// ---------------------------------------------------------------------------
// Child placement
// ---------------------------------------------------------------------------

/// Child nodes land within +-3 tiles of the parent (a 7x7 window).
const CHILD_OFFSET_SPAN: usize = 7;
const CHILD_OFFSET_HALF: i32 = 3;

/// Spawn a threat node and register it in the spatial index.
///
/// The encounter is drawn once from the owning faction's pool, falling back
/// to the type's default encounter. Intensity is clamped to `1..=max_intensity`.
pub fn create_threat_node(
    world: &mut World,
    pos: TilePos,
    threat_type: ThreatType,
    initial_intensity: i32,
    tick: u64,
) -> Entity {
    let owner = threat_type.faction();
    let (params, pool, intensity, magnitude) = {
        let config = world.resource::<SimulationConfig>();
        let intensity = initial_intensity.clamp(1, config.threat_growth.max_intensity);
        (
            config.threat_params(threat_type),
            config.encounter_pool(owner).to_vec(),
            intensity,
            config.magnitude_for(intensity),
        )
    };

    let encounter_id = if pool.is_empty() {
        params.encounter_id.clone()
    } else {
        let i = world.resource_mut::<OverworldRng>().index(pool.len());
        pool[i].clone()
    };

    let entity = world
        .spawn((
            ThreatNode {
                threat_type,
                owner,
                encounter_id: encounter_id.clone(),
                intensity,
                growth_progress: 0.0,
                growth_rate: params.base_growth_rate,
                is_contained: false,
                created_tick: tick,
            },
            Influence {
                radius: params.base_radius + intensity,
                magnitude,
            },
            pos,
        ))
        .id();
    world.resource_mut::<ThreatIndex>().insert(pos, entity);

    tracing::debug!(?entity, %pos, %threat_type, intensity, "threat spawned");
    log_event(
        world,
        EventKind::ThreatSpawned,
        tick,
        Some(entity),
        format!(
            "{} spawned at {pos} with intensity {intensity}",
            threat_type.display_name()
        ),
        json!({
            "threat_type": threat_type,
            "encounter_id": encounter_id,
            "intensity": intensity,
            "x": pos.x,
            "y": pos.y,
        }),
    );
    entity
}

/// Advance every threat node by one tick of growth, evolving those that fill
/// their accumulator. Nodes missing component data are skipped.
pub fn update_threat_nodes(world: &mut World, tick: u64) -> Result<(), SubsystemError> {
    require::<SimulationConfig>(world, "SimulationConfig")?;
    require::<ThreatIndex>(world, "ThreatIndex")?;
    require::<OverworldRng>(world, "OverworldRng")?;
    require::<EventLog>(world, "EventLog")?;

    let (growth_scale, slowdown) = {
        let growth = &world.resource::<SimulationConfig>().threat_growth;
        (growth.growth_scale, growth.containment_slowdown)
    };

    for entity in sorted_entities::<ThreatNode>(world) {
        let modifier = world
            .get::<InfluenceInteractions>(entity)
            .map(|i| i.net_modifier)
            .unwrap_or(1.0);
        let Some(mut node) = world.get_mut::<ThreatNode>(entity) else {
            continue;
        };

        let mut growth = node.growth_rate * growth_scale;
        if node.is_contained {
            growth *= slowdown;
        }
        node.growth_progress += growth * modifier;

        if node.growth_progress >= 1.0 {
            node.growth_progress = 0.0;
            evolve_threat_node(world, entity, tick);
        }
    }
    Ok(())
}

/// Raise intensity by one and fire the type's evolution effect.
///
/// A node already at max intensity is left untouched.
pub fn evolve_threat_node(world: &mut World, entity: Entity, tick: u64) {
    let (max_intensity, threshold) = {
        let growth = &world.resource::<SimulationConfig>().threat_growth;
        (growth.max_intensity, growth.child_spawn_threshold)
    };

    let Some(mut node) = world.get_mut::<ThreatNode>(entity) else {
        return;
    };
    if node.intensity >= max_intensity {
        return;
    }
    let old = node.intensity;
    node.intensity += 1;
    let (threat_type, new) = (node.threat_type, node.intensity);

    let (params, magnitude) = {
        let config = world.resource::<SimulationConfig>();
        (config.threat_params(threat_type), config.magnitude_for(new))
    };
    if let Some(mut influence) = world.get_mut::<Influence>(entity) {
        influence.radius = params.base_radius + new;
        influence.magnitude = magnitude;
    }

    log_event(
        world,
        EventKind::ThreatEvolved,
        tick,
        Some(entity),
        format!("{} evolved {old} -> {new}", threat_type.display_name()),
        json!({ "old_intensity": old, "intensity": new }),
    );

    if !params.can_spawn_children {
        return;
    }
    match threat_type {
        ThreatType::Necromancer if new % threshold == 0 => {
            let Some(pos) = world.get::<TilePos>(entity).copied() else {
                return;
            };
            if spawn_child_threat_node(world, pos, threat_type, 1).is_none() {
                tracing::warn!(?entity, %pos, "no free tile for child threat node");
                log_event(
                    world,
                    EventKind::ThreatSpawnFailed,
                    tick,
                    Some(entity),
                    "Failed to spawn child node (no valid positions)".to_string(),
                    json!({ "x": pos.x, "y": pos.y }),
                );
            }
        }
        ThreatType::Corruption => {
            spread_corruption(world, entity);
        }
        _ => {}
    }
}

/// Try random offsets in the 7x7 window around `parent` and spawn at the
/// first walkable tile without a threat. `None` when the attempt budget runs out.
pub fn spawn_child_threat_node(
    world: &mut World,
    parent: TilePos,
    threat_type: ThreatType,
    intensity: i32,
) -> Option<Entity> {
    let attempts = world
        .resource::<SimulationConfig>()
        .threat_growth
        .max_child_spawn_attempts;

    for _ in 0..attempts {
        let candidate = {
            let mut rng = world.resource_mut::<OverworldRng>();
            let dx = rng.index(CHILD_OFFSET_SPAN) as i32 - CHILD_OFFSET_HALF;
            let dy = rng.index(CHILD_OFFSET_SPAN) as i32 - CHILD_OFFSET_HALF;
            parent.offset(dx, dy)
        };
        if is_free_tile(world, candidate) {
            let tick = current_tick(world);
            return Some(create_threat_node(
                world,
                candidate,
                threat_type,
                intensity,
                tick,
            ));
        }
    }
    None
}

/// Spread to one random cardinal neighbour if it is walkable and free.
pub fn spread_corruption(world: &mut World, entity: Entity) -> Option<Entity> {
    let pos = world.get::<TilePos>(entity).copied()?;
    let neighbors = pos.cardinal_neighbors();
    let target = neighbors[world.resource_mut::<OverworldRng>().index(neighbors.len())];
    if !is_free_tile(world, target) {
        return None;
    }
    let tick = current_tick(world);
    Some(create_threat_node(
        world,
        target,
        ThreatType::Corruption,
        1,
        tick,
    ))
}

/// Log and remove a threat node. Safe when the position is already gone.
///
/// Returns `false` if the entity did not exist.
pub fn destroy_threat_node(world: &mut World, entity: Entity) -> bool {
    if world.get_entity(entity).is_err() {
        return false;
    }
    let pos = world.get::<TilePos>(entity).copied();

    if let Some(node) = world.get::<ThreatNode>(entity) {
        let name = node.threat_type.display_name();
        let location = pos.map_or_else(|| "unknown".to_string(), |p| p.to_string());
        let tick = current_tick(world);
        log_event(
            world,
            EventKind::ThreatDestroyed,
            tick,
            Some(entity),
            format!("{name} destroyed at {location}"),
            json!({ "x": pos.map(|p| p.x), "y": pos.map(|p| p.y) }),
        );
    }

    if let Some(mut index) = world.get_resource_mut::<ThreatIndex>() {
        let removed = pos.is_some_and(|p| index.remove(p, entity));
        if !removed {
            index.remove_everywhere(entity);
        }
    }
    world.despawn(entity)
}

/// Mark threats within `containment_radius` (Chebyshev) of any player
/// position as contained; clear the flag on the rest.
pub fn apply_containment(world: &mut World, player_positions: &[TilePos]) {
    let Some(radius) = world
        .get_resource::<SimulationConfig>()
        .map(|c| c.threat_growth.containment_radius)
    else {
        return;
    };
    let mut query = world.query::<(&mut ThreatNode, &TilePos)>();
    mark_contained(query.iter_mut(world), player_positions, radius);
}

/// Containment step of the overworld tick.
pub fn contain_threats(
    presence: Res<PlayerPresence>,
    config: Option<Res<SimulationConfig>>,
    mut threats: Query<(&mut ThreatNode, &TilePos)>,
) {
    let Some(config) = config else {
        return;
    };
    mark_contained(
        threats.iter_mut(),
        &presence.positions,
        config.threat_growth.containment_radius,
    );
}

fn mark_contained<'a>(
    nodes: impl Iterator<Item = (Mut<'a, ThreatNode>, &'a TilePos)>,
    player_positions: &[TilePos],
    radius: i32,
) {
    for (mut node, pos) in nodes {
        let contained = player_positions
            .iter()
            .any(|p| p.chebyshev_distance(pos) <= radius);
        if node.is_contained != contained {
            node.is_contained = contained;
        }
    }
}

/// Growth step of the overworld tick.
pub fn grow_threats(world: &mut World) {
    let tick = current_tick(world);
    if let Err(err) = update_threat_nodes(world, tick) {
        record_failure(world, TickError::ThreatUpdate(err));
    }
}

fn is_free_tile(world: &World, pos: TilePos) -> bool {
    world.resource::<SimulationConfig>().map.is_walkable(pos)
        && !world.resource::<ThreatIndex>().is_occupied(pos)
}
