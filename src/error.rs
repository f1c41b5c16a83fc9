use bevy_ecs::entity::Entity;
use thiserror::Error;

/// Failure loading or validating a [`SimulationConfig`](crate::ecs::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Structural failure inside one subsystem pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubsystemError {
    #[error("required resource {0} is not initialized")]
    MissingResource(&'static str),
}

/// Failure of a whole tick, carrying which step aborted it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error("tick state is not initialized")]
    MissingTickState,
    #[error("overworld tick schedule is not installed")]
    MissingSchedule,
    #[error("influence resolution failed: {0}")]
    Influence(#[source] SubsystemError),
    #[error("threat update failed: {0}")]
    ThreatUpdate(#[source] SubsystemError),
    #[error("faction update failed: {0}")]
    FactionUpdate(#[source] SubsystemError),
}

/// Failure changing who holds a node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("node entity {0} not found")]
    NotFound(Entity),
    #[error("entity {0} is not an overworld node")]
    NotANode(Entity),
}
