pub mod app;
pub mod components;
pub mod conditions;
pub mod garrison;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod systems;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use app::{
    build_overworld_app, build_overworld_app_seeded, build_overworld_app_with_garrisons,
    insert_overworld_resources,
};
pub use components::{
    Influence, InfluenceInteractions, NodeInteraction, OverworldFaction, PlayerNode,
    StrategicIntent, Territory, ThreatNode,
};
pub use garrison::{GarrisonRoster, GarrisonService, NpcGarrison};
pub use plugin::OverworldPlugin;
pub use resources::{
    EventLog, OverworldEvent, OverworldRng, SessionRecord, SimulationConfig, ThreatIndex,
    TickState, VictoryState,
};
pub use schedule::{OverworldPhase, OverworldTick, configure_overworld_schedule};
pub use systems::{PendingRaid, SpawnOutcome};
pub use tick::{PlayerPresence, TickOutcome, TickResult, advance_tick};
