//! Cross-node influence. Overlapping nodes boost or suppress each other's
//! growth; the result lands in each node's `InfluenceInteractions`.

use std::collections::{BTreeMap, BTreeSet};

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::world::World;
use serde_json::json;

use crate::ecs::components::{
    Influence, InfluenceInteractions, NodeInteraction, PlayerNode, ThreatNode,
};
use crate::ecs::resources::{EventLog, SimulationConfig};
use crate::ecs::schedule::{OverworldPhase, OverworldTick};
use crate::ecs::tick::record_failure;
use crate::error::{SubsystemError, TickError};
use crate::model::{EventKind, FactionType, InteractionType, NodeOwner, TilePos};

use super::helpers::{creation_order, current_tick, log_event, require, sorted_entities};

/// Strongest interactions kept per interaction type.
const TOP_PER_TYPE: usize = 2;

#[derive(Debug, Clone)]
enum Side {
    Hostile(FactionType),
    /// Player-held or neutral node, by node type.
    Friendly(String),
}

#[derive(Debug, Clone)]
struct InfluenceSource {
    entity: Entity,
    pos: TilePos,
    radius: i32,
    side: Side,
}

pub struct InfluencePlugin;

impl Plugin for InfluencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OverworldTick,
            resolve_influence.in_set(OverworldPhase::Influence),
        );
    }
}

/// Influence step of the overworld tick.
pub fn resolve_influence(world: &mut World) {
    let tick = current_tick(world);
    if let Err(err) = update_influence_interactions(world, tick) {
        record_failure(world, TickError::Influence(err));
    }
}

/// Rebuild every node's interactions for this tick.
///
/// Pairs interact when their Manhattan distance is within the sum of their
/// radii. Only interactions that did not exist last tick are journaled.
pub fn update_influence_interactions(world: &mut World, tick: u64) -> Result<(), SubsystemError> {
    require::<SimulationConfig>(world, "SimulationConfig")?;
    require::<EventLog>(world, "EventLog")?;

    let sources = collect_sources(world);
    let previous = previous_partners(world);

    let mut found: BTreeMap<Entity, Vec<NodeInteraction>> = BTreeMap::new();
    let mut formed = Vec::new();
    {
        let influence = &world.resource::<SimulationConfig>().influence;
        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                let distance = a.pos.manhattan_distance(&b.pos);
                if distance > a.radius + b.radius {
                    continue;
                }
                let (kind, modifier) = match (&a.side, &b.side) {
                    (Side::Hostile(x), Side::Hostile(y)) if x == y => {
                        (InteractionType::Synergy, influence.synergy_bonus)
                    }
                    (Side::Hostile(_), Side::Hostile(_)) => {
                        (InteractionType::Competition, -influence.competition_penalty)
                    }
                    (Side::Friendly(node_type), Side::Hostile(_))
                    | (Side::Hostile(_), Side::Friendly(node_type)) => (
                        InteractionType::Suppression,
                        -influence.suppression_penalty * influence.suppression_multiplier(node_type),
                    ),
                    (Side::Friendly(x), Side::Friendly(y)) => {
                        (InteractionType::PlayerBoost, influence.player_boost(x, y))
                    }
                };

                found.entry(a.entity).or_default().push(NodeInteraction {
                    other: b.entity,
                    kind,
                    modifier,
                    distance,
                });
                found.entry(b.entity).or_default().push(NodeInteraction {
                    other: a.entity,
                    kind,
                    modifier,
                    distance,
                });

                let is_new = previous
                    .get(&a.entity)
                    .is_none_or(|partners| !partners.contains(&b.entity));
                if is_new {
                    formed.push((a.entity, b.entity, kind, distance));
                }
            }
        }
    }

    for entity in sorted_entities::<InfluenceInteractions>(world) {
        if !found.contains_key(&entity)
            && let Some(mut stale) = world.get_mut::<InfluenceInteractions>(entity)
        {
            *stale = InfluenceInteractions::default();
        }
    }
    for (entity, interactions) in found {
        let net_modifier = net_modifier(&interactions);
        world.entity_mut(entity).insert(InfluenceInteractions {
            interactions,
            net_modifier,
        });
    }

    for (a, b, kind, distance) in formed {
        let (event, label) = match kind {
            InteractionType::Synergy => (EventKind::InfluenceSynergy, "Synergy cluster"),
            InteractionType::Competition => (EventKind::InfluenceCompetition, "Faction rivalry"),
            InteractionType::Suppression => (EventKind::InfluenceSuppression, "Player suppression"),
            InteractionType::PlayerBoost => (EventKind::InfluencePlayerBoost, "Player network"),
        };
        log_event(
            world,
            event,
            tick,
            Some(a),
            format!("{label}: nodes {a} and {b} (dist {distance})"),
            json!({ "other": b.to_bits(), "distance": distance }),
        );
    }
    Ok(())
}

/// 1.0 plus the two strongest modifiers (by magnitude) of each type, floored at 0.
pub fn net_modifier(interactions: &[NodeInteraction]) -> f64 {
    let mut groups: BTreeMap<InteractionType, Vec<f64>> = BTreeMap::new();
    for interaction in interactions {
        groups
            .entry(interaction.kind)
            .or_default()
            .push(interaction.modifier);
    }
    let effect: f64 = groups
        .into_values()
        .map(|mut modifiers| {
            modifiers.sort_by(|a, b| b.abs().total_cmp(&a.abs()));
            modifiers.into_iter().take(TOP_PER_TYPE).sum::<f64>()
        })
        .sum();
    (1.0 + effect).max(0.0)
}

fn collect_sources(world: &mut World) -> Vec<InfluenceSource> {
    let mut sources = Vec::new();
    let mut threats = world.query::<(Entity, &ThreatNode, &TilePos, &Influence)>();
    for (entity, node, pos, influence) in threats.iter(world) {
        sources.push(InfluenceSource {
            entity,
            pos: *pos,
            radius: influence.radius,
            side: Side::Hostile(node.owner),
        });
    }
    let mut players = world.query::<(Entity, &PlayerNode, &TilePos, &Influence)>();
    for (entity, node, pos, influence) in players.iter(world) {
        sources.push(InfluenceSource {
            entity,
            pos: *pos,
            radius: influence.radius,
            side: match node.owner {
                NodeOwner::Faction(faction) => Side::Hostile(faction),
                NodeOwner::Player | NodeOwner::Neutral => Side::Friendly(node.node_type.clone()),
            },
        });
    }
    sources.sort_by_key(|s| creation_order(s.entity));
    sources
}

fn previous_partners(world: &mut World) -> BTreeMap<Entity, BTreeSet<Entity>> {
    let mut query = world.query::<(Entity, &InfluenceInteractions)>();
    query
        .iter(world)
        .map(|(entity, data)| (entity, data.interactions.iter().map(|i| i.other).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::systems::{create_player_node, create_threat_node};
    use crate::ecs::test_helpers::setup_world;
    use crate::model::ThreatType;

    #[test]
    fn same_owner_threats_form_synergy() {
        let mut world = setup_world(1);
        let a = create_threat_node(&mut world, TilePos::new(10, 10), ThreatType::BanditCamp, 1, 0);
        let b = create_threat_node(&mut world, TilePos::new(13, 10), ThreatType::BanditCamp, 1, 0);

        update_influence_interactions(&mut world, 1).unwrap();

        let data = world.get::<InfluenceInteractions>(a).unwrap();
        assert_eq!(data.interactions.len(), 1);
        assert_eq!(data.interactions[0].other, b);
        assert_eq!(data.interactions[0].kind, InteractionType::Synergy);
        assert!((data.net_modifier - 1.1).abs() < 1e-9);
        assert!(world.get::<InfluenceInteractions>(b).unwrap().is_interacting_with(a));
    }

    #[test]
    fn rival_threats_compete_and_players_suppress() {
        let mut world = setup_world(1);
        let orc = create_threat_node(&mut world, TilePos::new(10, 10), ThreatType::OrcWarband, 1, 0);
        create_threat_node(&mut world, TilePos::new(12, 10), ThreatType::BeastNest, 1, 0);
        create_player_node(&mut world, TilePos::new(10, 13), "fortress");

        update_influence_interactions(&mut world, 1).unwrap();

        let data = world.get::<InfluenceInteractions>(orc).unwrap();
        let kinds: BTreeSet<InteractionType> = data.interactions.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&InteractionType::Competition));
        assert!(kinds.contains(&InteractionType::Suppression));
        // 1.0 - 0.1 competition - 0.2 * 2.0 fortress
        assert!((data.net_modifier - 0.5).abs() < 1e-9);
    }

    #[test]
    fn friendly_nodes_boost_each_other() {
        let mut world = setup_world(1);
        let town = create_player_node(&mut world, TilePos::new(10, 10), "town");
        let tower = create_player_node(&mut world, TilePos::new(12, 10), "watchtower");
        let other_town = create_player_node(&mut world, TilePos::new(10, 13), "town");

        update_influence_interactions(&mut world, 1).unwrap();

        let data = world.get::<InfluenceInteractions>(town).unwrap();
        assert!(data.interactions.iter().all(|i| i.kind == InteractionType::PlayerBoost));
        let to_tower = data.interactions.iter().find(|i| i.other == tower).unwrap();
        let to_town = data.interactions.iter().find(|i| i.other == other_town).unwrap();
        assert!((to_tower.modifier - 0.15).abs() < 1e-9);
        assert!((to_town.modifier - 0.05).abs() < 1e-9);
        assert!((data.net_modifier - 1.2).abs() < 1e-9);
        assert_eq!(world.resource::<EventLog>().count(EventKind::InfluencePlayerBoost), 3);
    }

    #[test]
    fn captured_node_sides_with_its_new_owner() {
        let mut world = setup_world(1);
        let node = create_player_node(&mut world, TilePos::new(10, 10), "fortress");
        let camp = create_threat_node(&mut world, TilePos::new(12, 10), ThreatType::OrcWarband, 1, 0);
        world.get_mut::<PlayerNode>(node).unwrap().owner = NodeOwner::Faction(FactionType::Orcs);

        update_influence_interactions(&mut world, 1).unwrap();

        let data = world.get::<InfluenceInteractions>(camp).unwrap();
        assert_eq!(data.interactions.len(), 1);
        assert_eq!(data.interactions[0].kind, InteractionType::Synergy);
    }

    #[test]
    fn interactions_are_logged_once_and_cleared_when_apart() {
        let mut world = setup_world(1);
        let a = create_threat_node(&mut world, TilePos::new(10, 10), ThreatType::BanditCamp, 1, 0);
        create_threat_node(&mut world, TilePos::new(12, 10), ThreatType::BanditCamp, 1, 0);

        update_influence_interactions(&mut world, 1).unwrap();
        update_influence_interactions(&mut world, 2).unwrap();
        assert_eq!(world.resource::<EventLog>().count(EventKind::InfluenceSynergy), 1);

        *world.get_mut::<TilePos>(a).unwrap() = TilePos::new(60, 60);
        update_influence_interactions(&mut world, 3).unwrap();
        let data = world.get::<InfluenceInteractions>(a).unwrap();
        assert!(data.interactions.is_empty());
        assert_eq!(data.net_modifier, 1.0);
    }

    #[test]
    fn net_modifier_keeps_top_two_per_type_and_floors_at_zero() {
        let mut world = World::new();
        let other = world.spawn_empty().id();
        let mk = |kind, modifier| NodeInteraction {
            other,
            kind,
            modifier,
            distance: 1,
        };
        let synergy = [
            mk(InteractionType::Synergy, 0.1),
            mk(InteractionType::Synergy, 0.3),
            mk(InteractionType::Synergy, 0.2),
        ];
        assert!((net_modifier(&synergy) - 1.5).abs() < 1e-9);

        let crushing = [
            mk(InteractionType::Suppression, -0.8),
            mk(InteractionType::Suppression, -0.7),
            mk(InteractionType::Competition, -0.5),
        ];
        assert_eq!(net_modifier(&crushing), 0.0);
        assert_eq!(net_modifier(&[]), 1.0);
    }
}
