use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use serde_json::json;

use crate::ecs::components::{Influence, PlayerNode};
use crate::ecs::garrison::GarrisonService;
use crate::ecs::resources::SimulationConfig;
use crate::error::NodeError;
use crate::model::{EventKind, NodeOwner, TilePos};

use super::helpers::{current_tick, log_event};

/// Place a player-owned node. It suppresses nearby threats and can be raided.
pub fn create_player_node(world: &mut World, pos: TilePos, node_type: &str) -> Entity {
    let radius = world
        .get_resource::<SimulationConfig>()
        .map(|c| c.influence.player_node_radius)
        .unwrap_or_default();
    world
        .spawn((
            PlayerNode {
                node_type: node_type.to_string(),
                owner: NodeOwner::Player,
            },
            Influence {
                radius,
                magnitude: 0.0,
            },
            pos,
        ))
        .id()
}

/// Hand a node to `new_owner` after its defenders lost, dropping whatever
/// garrison was recorded there. Returns the previous owner.
pub fn transfer_node_ownership(
    world: &mut World,
    node: Entity,
    new_owner: NodeOwner,
    garrisons: &mut dyn GarrisonService,
) -> Result<NodeOwner, NodeError> {
    let previous = {
        let mut entity = world
            .get_entity_mut(node)
            .map_err(|_| NodeError::NotFound(node))?;
        let mut data = entity
            .get_mut::<PlayerNode>()
            .ok_or(NodeError::NotANode(node))?;
        std::mem::replace(&mut data.owner, new_owner)
    };

    garrisons.remove_garrison(node);

    let tick = current_tick(world);
    log_event(
        world,
        EventKind::NodeCaptured,
        tick,
        Some(node),
        format!("Node {node} captured: {previous} -> {new_owner}"),
        json!({ "from": previous.to_string(), "to": new_owner.to_string() }),
    );
    tracing::debug!(?node, %previous, %new_owner, "node ownership transferred");
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::garrison::GarrisonRoster;
    use crate::ecs::resources::EventLog;
    use crate::ecs::test_helpers::setup_world;
    use crate::model::FactionType;

    #[test]
    fn capture_changes_owner_and_clears_garrison() {
        let mut world = setup_world(1);
        let node = create_player_node(&mut world, TilePos::new(5, 5), "watchtower");
        let mut roster = GarrisonRoster::new();
        roster.assign_squad(node, 3);

        let orcs = NodeOwner::Faction(FactionType::Orcs);
        let previous = transfer_node_ownership(&mut world, node, orcs, &mut roster).unwrap();

        assert_eq!(previous, NodeOwner::Player);
        assert_eq!(world.get::<PlayerNode>(node).unwrap().owner, orcs);
        assert!(!roster.is_node_garrisoned(node));
        let log = world.resource::<EventLog>();
        let captured: Vec<_> = log.of_kind(EventKind::NodeCaptured).collect();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].data["to"], "orcs");
    }

    #[test]
    fn capture_rejects_missing_and_non_node_entities() {
        let mut world = setup_world(1);
        let mut roster = GarrisonRoster::new();
        let plain = world.spawn(TilePos::new(1, 1)).id();
        assert_eq!(
            transfer_node_ownership(&mut world, plain, NodeOwner::Neutral, &mut roster),
            Err(NodeError::NotANode(plain))
        );

        world.despawn(plain);
        assert_eq!(
            transfer_node_ownership(&mut world, plain, NodeOwner::Neutral, &mut roster),
            Err(NodeError::NotFound(plain))
        );
        assert_eq!(world.resource::<EventLog>().count(EventKind::NodeCaptured), 0);
    }
}
