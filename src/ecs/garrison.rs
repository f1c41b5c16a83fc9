//! Garrison collaborator: who is defending which node.
//!
//! Faction AI only talks to [`GarrisonService`]. [`GarrisonRoster`] is the
//! in-crate implementation, a plain record of player squads and NPC garrisons
//! keyed by node entity.

use std::collections::{BTreeMap, BTreeSet};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;

use crate::ecs::components::PlayerNode;
use crate::ecs::resources::SimulationConfig;
use crate::ecs::systems::helpers::sort_by_creation;
use crate::model::{FactionType, NodeOwner, TilePos};

/// Operations faction AI needs from whoever tracks garrisons.
///
/// Reads must be stable between writes within one tick.
pub trait GarrisonService {
    fn is_node_garrisoned(&self, node: Entity) -> bool;

    fn create_npc_garrison(&mut self, node: Entity, faction: FactionType, strength: i32);

    /// Forget any garrison at `node`, e.g. after it changes hands.
    fn remove_garrison(&mut self, node: Entity);

    /// Player-held nodes within raid range of any of `owned_tiles`, oldest first.
    fn find_player_nodes_near_faction(&self, world: &World, owned_tiles: &[TilePos]) -> Vec<Entity>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcGarrison {
    pub faction: FactionType,
    pub level: i32,
}

/// Stored as a resource so the faction pass can reach it during a tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GarrisonRoster {
    player_squads: BTreeMap<Entity, BTreeSet<u64>>,
    npc: BTreeMap<Entity, NpcGarrison>,
}

impl GarrisonRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Station a player squad at `node`. `false` if it is already there.
    pub fn assign_squad(&mut self, node: Entity, squad: u64) -> bool {
        self.player_squads.entry(node).or_default().insert(squad)
    }

    /// Withdraw a player squad. `false` if it was not stationed at `node`.
    pub fn remove_squad(&mut self, node: Entity, squad: u64) -> bool {
        let Some(squads) = self.player_squads.get_mut(&node) else {
            return false;
        };
        let removed = squads.remove(&squad);
        if squads.is_empty() {
            self.player_squads.remove(&node);
        }
        removed
    }

    pub fn squads_at(&self, node: Entity) -> impl Iterator<Item = u64> + '_ {
        self.player_squads.get(&node).into_iter().flatten().copied()
    }

    pub fn npc_garrison(&self, node: Entity) -> Option<NpcGarrison> {
        self.npc.get(&node).copied()
    }
}

impl GarrisonService for GarrisonRoster {
    fn is_node_garrisoned(&self, node: Entity) -> bool {
        self.player_squads.contains_key(&node) || self.npc.contains_key(&node)
    }

    fn create_npc_garrison(&mut self, node: Entity, faction: FactionType, strength: i32) {
        if self.is_node_garrisoned(node) {
            return;
        }
        let level = 1 + strength / 20;
        tracing::debug!(?node, %faction, level, "npc garrison created");
        self.npc.insert(node, NpcGarrison { faction, level });
    }

    fn remove_garrison(&mut self, node: Entity) {
        self.player_squads.remove(&node);
        self.npc.remove(&node);
    }

    fn find_player_nodes_near_faction(&self, world: &World, owned_tiles: &[TilePos]) -> Vec<Entity> {
        let range = world
            .get_resource::<SimulationConfig>()
            .map(|c| c.faction_ai.raid_proximity_range)
            .unwrap_or_default();
        let Some(mut query) = world.try_query::<(Entity, &PlayerNode, &TilePos)>() else {
            return Vec::new();
        };
        let mut nodes: Vec<Entity> = query
            .iter(world)
            .filter(|(_, node, _)| node.owner == NodeOwner::Player)
            .filter(|(_, _, pos)| owned_tiles.iter().any(|t| t.manhattan_distance(pos) <= range))
            .map(|(entity, _, _)| entity)
            .collect();
        sort_by_creation(&mut nodes);
        nodes
    }
}
