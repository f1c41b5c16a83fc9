//! Read-only aggregate queries over threats and factions.
//!
//! Nothing here is cached; every call walks the matching entities.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{OverworldFaction, Territory, ThreatNode};
use crate::model::{FactionIntent, FactionType, ThreatType, TilePos};

use super::helpers::{creation_order, sort_by_creation};

/// Threat entities matching `keep`, oldest first.
fn threats_where(
    world: &World,
    mut keep: impl FnMut(&ThreatNode, Option<&TilePos>) -> bool,
) -> Vec<Entity> {
    let Some(mut query) = world.try_query::<(Entity, &ThreatNode, Option<&TilePos>)>() else {
        return Vec::new();
    };
    let mut found: Vec<Entity> = query
        .iter(world)
        .filter(|(_, node, pos)| keep(node, *pos))
        .map(|(e, _, _)| e)
        .collect();
    sort_by_creation(&mut found);
    found
}

fn intensities(world: &World) -> Vec<i32> {
    let Some(mut query) = world.try_query::<&ThreatNode>() else {
        return Vec::new();
    };
    query.iter(world).map(|n| n.intensity).collect()
}

/// Faction entities matching `keep`, oldest first.
fn factions_where(world: &World, mut keep: impl FnMut(&OverworldFaction) -> bool) -> Vec<Entity> {
    let Some(mut query) = world.try_query::<(Entity, &OverworldFaction)>() else {
        return Vec::new();
    };
    let mut found: Vec<Entity> = query
        .iter(world)
        .filter(|(_, f)| keep(f))
        .map(|(e, _)| e)
        .collect();
    sort_by_creation(&mut found);
    found
}

/// (entity, strength) for every faction, oldest first.
fn strengths(world: &World) -> Vec<(Entity, i32)> {
    let Some(mut query) = world.try_query::<(Entity, &OverworldFaction)>() else {
        return Vec::new();
    };
    let mut all: Vec<(Entity, i32)> = query.iter(world).map(|(e, f)| (e, f.strength)).collect();
    all.sort_by_key(|(e, _)| creation_order(*e));
    all
}

// ---------------------------------------------------------------------------
// Threats
// ---------------------------------------------------------------------------

pub fn count_threat_nodes(world: &World) -> usize {
    world
        .try_query::<&ThreatNode>()
        .map_or(0, |mut query| query.iter(world).count())
}

pub fn count_threats_at_or_above(world: &World, min_intensity: i32) -> usize {
    intensities(world)
        .into_iter()
        .filter(|i| *i >= min_intensity)
        .count()
}

/// 0.0 when there are no threats.
pub fn average_threat_intensity(world: &World) -> f64 {
    let all = intensities(world);
    if all.is_empty() {
        return 0.0;
    }
    let total: i64 = all.iter().map(|i| i64::from(*i)).sum();
    total as f64 / all.len() as f64
}

/// Sum of all threat intensities.
pub fn total_threat_influence(world: &World) -> f64 {
    intensities(world).into_iter().map(f64::from).sum()
}

pub fn threats_by_type(world: &World, threat_type: ThreatType) -> Vec<Entity> {
    threats_where(world, |node, _| node.threat_type == threat_type)
}

pub fn threat_at(world: &World, pos: TilePos) -> Option<Entity> {
    threats_where(world, |_, p| p == Some(&pos)).first().copied()
}

pub fn threats_within_radius(world: &World, center: TilePos, radius: i32) -> Vec<Entity> {
    threats_where(world, |_, p| {
        p.is_some_and(|p| p.chebyshev_distance(&center) <= radius)
    })
}

// ---------------------------------------------------------------------------
// Factions
// ---------------------------------------------------------------------------

pub fn count_factions(world: &World) -> usize {
    world
        .try_query::<&OverworldFaction>()
        .map_or(0, |mut query| query.iter(world).count())
}

pub fn factions_by_type(world: &World, faction_type: FactionType) -> Vec<Entity> {
    factions_where(world, |f| f.faction_type == faction_type)
}

pub fn factions_by_intent(world: &World, intent: FactionIntent) -> Vec<Entity> {
    factions_where(world, |f| f.current_intent == intent)
}

/// Ties go to the earliest entity.
pub fn strongest_faction(world: &World) -> Option<Entity> {
    strengths(world)
        .into_iter()
        .rev()
        .max_by_key(|(_, strength)| *strength)
        .map(|(e, _)| e)
}

/// Ties go to the earliest entity.
pub fn weakest_faction(world: &World) -> Option<Entity> {
    strengths(world)
        .into_iter()
        .min_by_key(|(_, strength)| *strength)
        .map(|(e, _)| e)
}

pub fn total_faction_territory(world: &World) -> usize {
    let Some(mut query) = world.try_query::<&Territory>() else {
        return 0;
    };
    query.iter(world).map(|t| t.owned_tiles.len()).sum()
}

pub fn average_faction_strength(world: &World) -> f64 {
    let all = strengths(world);
    if all.is_empty() {
        return 0.0;
    }
    let total: i64 = all.iter().map(|(_, s)| i64::from(*s)).sum();
    total as f64 / all.len() as f64
}

/// Faction whose territory includes `pos`.
pub fn faction_owning_tile(world: &World, pos: TilePos) -> Option<Entity> {
    let mut query = world.try_query::<(Entity, &Territory)>()?;
    query
        .iter(world)
        .filter(|(_, t)| t.contains(pos))
        .map(|(e, _)| e)
        .min_by_key(|e| creation_order(*e))
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;

    use super::*;
    use crate::ecs::systems::{create_faction, create_threat_node};
    use crate::ecs::test_helpers::setup_world;

    #[test]
    fn empty_world_queries() {
        let world = World::new();
        assert_eq!(count_threat_nodes(&world), 0);
        assert_eq!(average_threat_intensity(&world), 0.0);
        assert_eq!(strongest_faction(&world), None);
        assert_eq!(faction_owning_tile(&world, TilePos::new(0, 0)), None);
    }

    #[test]
    fn threat_aggregates() {
        let mut world = setup_world(1);
        create_threat_node(&mut world, TilePos::new(1, 1), ThreatType::BanditCamp, 2, 0);
        let b = create_threat_node(&mut world, TilePos::new(5, 5), ThreatType::OrcWarband, 8, 0);
        create_threat_node(&mut world, TilePos::new(30, 30), ThreatType::OrcWarband, 9, 0);

        assert_eq!(count_threat_nodes(&world), 3);
        assert_eq!(count_threats_at_or_above(&world, 8), 2);
        assert!((average_threat_intensity(&world) - 19.0 / 3.0).abs() < 1e-9);
        assert_eq!(total_threat_influence(&world), 19.0);
        assert_eq!(threats_by_type(&world, ThreatType::OrcWarband).len(), 2);
        assert_eq!(threat_at(&world, TilePos::new(5, 5)), Some(b));
        assert_eq!(threats_within_radius(&world, TilePos::new(3, 3), 2).len(), 2);
    }

    #[test]
    fn faction_aggregates() {
        let mut world = setup_world(1);
        let weak = create_faction(&mut world, FactionType::Bandits, TilePos::new(1, 1), 2);
        let strong = create_faction(&mut world, FactionType::Orcs, TilePos::new(10, 10), 9);
        let tied = create_faction(&mut world, FactionType::Orcs, TilePos::new(20, 10), 9);

        assert_eq!(count_factions(&world), 3);
        assert_eq!(factions_by_type(&world, FactionType::Orcs), vec![strong, tied]);
        assert_eq!(factions_by_intent(&world, FactionIntent::Expand).len(), 3);
        assert_eq!(strongest_faction(&world), Some(strong));
        assert_eq!(weakest_faction(&world), Some(weak));
        assert_eq!(total_faction_territory(&world), 3);
        assert!((average_faction_strength(&world) - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(faction_owning_tile(&world, TilePos::new(10, 10)), Some(strong));
    }
}
