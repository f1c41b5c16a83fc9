use bevy_ecs::component::Component;

use crate::model::NodeOwner;

/// A settlement-style node (town, watchtower, ...). Paired with a `TilePos` and an `Influence`.
///
/// Starts out player-held; a successful raid can hand it to a faction.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlayerNode {
    pub node_type: String,
    pub owner: NodeOwner,
}
