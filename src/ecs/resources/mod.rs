pub mod config;
pub mod event_log;
pub mod sim_resources;
pub mod spatial_index;

pub use config::SimulationConfig;
pub use event_log::{EventLog, FactionSummary, OverworldEvent, SessionRecord, ThreatSummary};
pub use sim_resources::{OverworldRng, TickState, VictoryState};
pub use spatial_index::ThreatIndex;
