use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::{FactionType, InteractionType, ThreatType};

/// A hostile or environmental danger on the overworld. Always paired with a
/// `TilePos` and an `Influence`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ThreatNode {
    pub threat_type: ThreatType,
    pub owner: FactionType,
    /// Chosen once at creation.
    pub encounter_id: String,
    pub intensity: i32,
    /// Accumulator in `[0, 1)` between ticks.
    pub growth_progress: f64,
    pub growth_rate: f64,
    pub is_contained: bool,
    pub created_tick: u64,
}

/// Area of effect of a threat or player node.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Influence {
    pub radius: i32,
    pub magnitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInteraction {
    pub other: Entity,
    pub kind: InteractionType,
    pub modifier: f64,
    pub distance: i32,
}

/// Interactions resolved for this node in the current tick.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct InfluenceInteractions {
    pub interactions: Vec<NodeInteraction>,
    /// Multiplier applied to growth. 1.0 is neutral.
    pub net_modifier: f64,
}

impl Default for InfluenceInteractions {
    fn default() -> Self {
        Self {
            interactions: Vec::new(),
            net_modifier: 1.0,
        }
    }
}

impl InfluenceInteractions {
    pub fn is_interacting_with(&self, other: Entity) -> bool {
        self.interactions.iter().any(|i| i.other == other)
    }
}
