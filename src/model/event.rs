use serde::{Deserialize, Serialize};

/// Category of a journal entry recorded by the overworld simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventKind {
    ThreatSpawned,
    ThreatEvolved,
    ThreatSpawnFailed,
    ThreatDestroyed,
    FactionExpanded,
    FactionFortified,
    FactionRetreated,
    FactionRaid,
    FactionIntentChanged,
    GarrisonAttacked,
    InfluenceSynergy,
    InfluenceCompetition,
    InfluenceSuppression,
    InfluencePlayerBoost,
    NodeCaptured,
    Victory,
    Defeat,
}

string_enum!(EventKind {
    ThreatSpawned => "threat_spawned",
    ThreatEvolved => "threat_evolved",
    ThreatSpawnFailed => "threat_spawn_failed",
    ThreatDestroyed => "threat_destroyed",
    FactionExpanded => "faction_expanded",
    FactionFortified => "faction_fortified",
    FactionRetreated => "faction_retreated",
    FactionRaid => "faction_raid",
    FactionIntentChanged => "faction_intent_changed",
    GarrisonAttacked => "garrison_attacked",
    InfluenceSynergy => "influence_synergy",
    InfluenceCompetition => "influence_competition",
    InfluenceSuppression => "influence_suppression",
    InfluencePlayerBoost => "influence_player_boost",
    NodeCaptured => "node_captured",
    Victory => "victory",
    Defeat => "defeat",
});

impl EventKind {
    pub fn is_threat_event(&self) -> bool {
        matches!(
            self,
            EventKind::ThreatSpawned
                | EventKind::ThreatEvolved
                | EventKind::ThreatSpawnFailed
                | EventKind::ThreatDestroyed
        )
    }

    pub fn is_faction_event(&self) -> bool {
        matches!(
            self,
            EventKind::FactionExpanded
                | EventKind::FactionFortified
                | EventKind::FactionRetreated
                | EventKind::FactionRaid
                | EventKind::FactionIntentChanged
                | EventKind::GarrisonAttacked
                | EventKind::NodeCaptured
        )
    }
}
