pub mod faction;
pub mod node;
pub mod threat;

pub use faction::{OverworldFaction, StrategicIntent, Territory};
pub use node::PlayerNode;
pub use threat::{Influence, InfluenceInteractions, NodeInteraction, ThreatNode};
