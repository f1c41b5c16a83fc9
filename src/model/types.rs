use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of hostile or environmental danger on the overworld map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ThreatType {
    Necromancer,
    BanditCamp,
    Corruption,
    BeastNest,
    OrcWarband,
}

string_enum!(ThreatType {
    Necromancer => "necromancer",
    BanditCamp => "bandit_camp",
    Corruption => "corruption",
    BeastNest => "beast_nest",
    OrcWarband => "orc_warband",
});

impl ThreatType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ThreatType::Necromancer => "Necromancer",
            ThreatType::BanditCamp => "Bandit Camp",
            ThreatType::Corruption => "Corruption",
            ThreatType::BeastNest => "Beast Nest",
            ThreatType::OrcWarband => "Orc Warband",
        }
    }

    /// The faction whose encounter pool and ownership this threat belongs to.
    pub fn faction(&self) -> FactionType {
        match self {
            ThreatType::Necromancer => FactionType::Necromancers,
            ThreatType::BanditCamp => FactionType::Bandits,
            ThreatType::Corruption => FactionType::Cultists,
            ThreatType::BeastNest => FactionType::Beasts,
            ThreatType::OrcWarband => FactionType::Orcs,
        }
    }
}

/// Autonomous NPC power on the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FactionType {
    Necromancers,
    Bandits,
    Beasts,
    Orcs,
    Cultists,
}

string_enum!(FactionType {
    Necromancers => "necromancers",
    Bandits => "bandits",
    Beasts => "beasts",
    Orcs => "orcs",
    Cultists => "cultists",
});

impl FactionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            FactionType::Necromancers => "Necromancers",
            FactionType::Bandits => "Bandits",
            FactionType::Beasts => "Beasts",
            FactionType::Orcs => "Orcs",
            FactionType::Cultists => "Cultists",
        }
    }

    /// Threat type this faction spawns on its territory.
    pub fn threat_type(&self) -> ThreatType {
        match self {
            FactionType::Necromancers => ThreatType::Necromancer,
            FactionType::Bandits => ThreatType::BanditCamp,
            FactionType::Beasts => ThreatType::BeastNest,
            FactionType::Orcs => ThreatType::OrcWarband,
            FactionType::Cultists => ThreatType::Corruption,
        }
    }
}

/// A faction's currently active strategic behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FactionIntent {
    Expand,
    Fortify,
    Raid,
    Retreat,
    Idle,
}

string_enum!(FactionIntent {
    Expand => "expand",
    Fortify => "fortify",
    Raid => "raid",
    Retreat => "retreat",
    Idle => "idle",
});

/// Named strategy profile that biases intent scoring for a faction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Archetype {
    Expansionist,
    Defensive,
    Aggressor,
    Raider,
    Territorial,
}

string_enum!(Archetype {
    Expansionist => "expansionist",
    Defensive => "defensive",
    Aggressor => "aggressor",
    Raider => "raider",
    Territorial => "territorial",
});

/// Primary effect a threat's influence has on surrounding tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum InfluenceEffect {
    SpawnBoost,
    ResourceDrain,
    TerrainCorruption,
    CombatDebuff,
}

string_enum!(InfluenceEffect {
    SpawnBoost => "spawn_boost",
    ResourceDrain => "resource_drain",
    TerrainCorruption => "terrain_corruption",
    CombatDebuff => "combat_debuff",
});

/// How two overlapping influence nodes affect each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum InteractionType {
    /// Same-owner threats boost each other.
    Synergy,
    /// Rival-owner threats slow each other.
    Competition,
    /// Player nodes slow nearby threats.
    Suppression,
    /// Friendly nodes strengthen each other.
    PlayerBoost,
}

string_enum!(InteractionType {
    Synergy => "synergy",
    Competition => "competition",
    Suppression => "suppression",
    PlayerBoost => "player_boost",
});

/// Who holds a settlement-style node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOwner {
    Player,
    Neutral,
    Faction(FactionType),
}

impl NodeOwner {
    pub fn is_hostile(&self) -> bool {
        matches!(self, NodeOwner::Faction(_))
    }
}

impl fmt::Display for NodeOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOwner::Player => f.write_str("player"),
            NodeOwner::Neutral => f.write_str("neutral"),
            NodeOwner::Faction(faction) => write!(f, "{faction}"),
        }
    }
}

/// Terminal (or not yet terminal) state of the overworld session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum VictoryCondition {
    #[default]
    None,
    PlayerWins,
    PlayerLoses,
    TimeLimit,
    FactionDefeat,
}

string_enum!(VictoryCondition {
    None => "none",
    PlayerWins => "player_wins",
    PlayerLoses => "player_loses",
    TimeLimit => "time_limit",
    FactionDefeat => "faction_defeat",
});

impl VictoryCondition {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VictoryCondition::None)
    }
}

/// Why the player lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DefeatReason {
    #[default]
    None,
    Influence,
    HighIntensityThreats,
}

string_enum!(DefeatReason {
    None => "none",
    Influence => "influence",
    HighIntensityThreats => "high_intensity_threats",
});
