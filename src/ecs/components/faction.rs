use bevy_ecs::component::Component;

use crate::model::{FactionIntent, FactionType, TilePos};

/// Core faction identity and stats.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OverworldFaction {
    pub faction_type: FactionType,
    pub strength: i32,
    /// Mirrors `Territory::owned_tiles.len()`.
    pub territory_size: usize,
    pub disposition: i32,
    pub current_intent: FactionIntent,
    pub growth_rate: f64,
}

/// Owned tiles in claim order. The first tile is home.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Territory {
    pub owned_tiles: Vec<TilePos>,
}

impl Territory {
    pub fn contains(&self, pos: TilePos) -> bool {
        self.owned_tiles.contains(&pos)
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct StrategicIntent {
    pub intent: FactionIntent,
    pub target: Option<TilePos>,
    /// Re-evaluated when this reaches zero.
    pub ticks_remaining: i32,
    pub priority: f64,
}
