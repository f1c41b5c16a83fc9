#[macro_use]
mod macros;

pub mod event;
pub mod position;
pub mod stockpile;
pub mod types;

pub use event::EventKind;
pub use position::{TilePos, random_tile};
pub use stockpile::{ResourceCost, ResourceStockpile, Shortfall};
pub use types::{
    Archetype, DefeatReason, FactionIntent, FactionType, InfluenceEffect, InteractionType,
    NodeOwner, ThreatType, VictoryCondition,
};
