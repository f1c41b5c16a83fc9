pub mod ecs;
pub mod error;
pub mod model;

pub use error::{ConfigError, NodeError, SubsystemError, TickError};
pub use model::{
    Archetype, DefeatReason, EventKind, FactionIntent, FactionType, InfluenceEffect,
    InteractionType, NodeOwner, ResourceCost, ResourceStockpile, ThreatType, TilePos, VictoryCondition,
};
