use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{
    Archetype, FactionType, InfluenceEffect, ResourceCost, ResourceStockpile, ThreatType, TilePos,
};

/// All tuning for the overworld simulation.
///
/// Inserted once as a resource when the app is built. Every section defaults
/// to the stock tuning, so a JSON file only needs the keys it overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub map: MapConfig,
    pub threat_growth: ThreatGrowthConfig,
    pub faction_ai: FactionAiConfig,
    pub strength_thresholds: StrengthThresholds,
    pub scoring: ScoringConfig,
    pub archetypes: ArchetypeConfig,
    pub spawn: SpawnChances,
    pub threat_types: BTreeMap<ThreatType, ThreatTypeParams>,
    pub encounter_pools: BTreeMap<FactionType, Vec<String>>,
    pub influence: InfluenceConfig,
    pub victory: VictoryThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    /// Impassable tiles (mountains, water).
    pub blocked: BTreeSet<TilePos>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 80,
            blocked: BTreeSet::new(),
        }
    }
}

impl MapConfig {
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.in_bounds(pos) && !self.blocked.contains(&pos)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatGrowthConfig {
    /// Global multiplier on every node's growth rate (difficulty knob).
    pub growth_scale: f64,
    /// Growth multiplier while a node is contained by player presence.
    pub containment_slowdown: f64,
    pub containment_radius: i32,
    pub max_intensity: i32,
    /// Child nodes spawn when intensity is a multiple of this.
    pub child_spawn_threshold: i32,
    pub max_child_spawn_attempts: u32,
    pub magnitude_per_intensity: f64,
}

impl Default for ThreatGrowthConfig {
    fn default() -> Self {
        Self {
            growth_scale: 1.0,
            containment_slowdown: 0.5,
            containment_radius: 5,
            max_intensity: 10,
            child_spawn_threshold: 3,
            max_child_spawn_attempts: 10,
            magnitude_per_intensity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionAiConfig {
    pub default_intent_ticks: i32,
    pub max_territory_size: usize,
    pub fortification_strength_gain: i32,
    pub idle_score_threshold: f64,
    pub raid_base_intensity: i32,
    pub raid_intensity_scale: f64,
    pub raid_proximity_range: i32,
    /// Percent chance per tick to garrison each ungarrisoned owned node while fortifying.
    pub garrison_chance: u32,
    pub starting_disposition: i32,
    pub starting_stockpile: ResourceStockpile,
}

impl Default for FactionAiConfig {
    fn default() -> Self {
        Self {
            default_intent_ticks: 10,
            max_territory_size: 30,
            fortification_strength_gain: 1,
            idle_score_threshold: 2.0,
            raid_base_intensity: 3,
            raid_intensity_scale: 0.2,
            raid_proximity_range: 5,
            garrison_chance: 30,
            starting_disposition: -50,
            starting_stockpile: ResourceStockpile::new(100, 50, 50, 50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthThresholds {
    pub weak: i32,
    pub strong: i32,
    pub critical: i32,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self {
            weak: 3,
            strong: 7,
            critical: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub expansion: ExpansionScoring,
    pub fortification: FortificationScoring,
    pub raiding: RaidingScoring,
    pub retreat: RetreatScoring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionScoring {
    pub strong_bonus: f64,
    pub small_territory_bonus: f64,
    pub max_territory_penalty: f64,
}

impl Default for ExpansionScoring {
    fn default() -> Self {
        Self {
            strong_bonus: 5.0,
            small_territory_bonus: 3.0,
            max_territory_penalty: -10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortificationScoring {
    pub weak_bonus: f64,
    pub base_value: f64,
}

impl Default for FortificationScoring {
    fn default() -> Self {
        Self {
            weak_bonus: 6.0,
            base_value: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidingScoring {
    pub strong_bonus: f64,
    pub very_strong_offset: i32,
}

impl Default for RaidingScoring {
    fn default() -> Self {
        Self {
            strong_bonus: 3.0,
            very_strong_offset: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetreatScoring {
    pub critical_weak_bonus: f64,
    pub small_territory_penalty: f64,
    pub min_territory_size: usize,
}

impl Default for RetreatScoring {
    fn default() -> Self {
        Self {
            critical_weak_bonus: 8.0,
            small_territory_penalty: -5.0,
            min_territory_size: 1,
        }
    }
}

/// Scoring bias of one archetype. `retreat_penalty` is subtracted from the retreat score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyBonus {
    pub expansion: f64,
    pub fortification: f64,
    pub raiding: f64,
    pub retreat_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeConfig {
    pub factions: BTreeMap<FactionType, Archetype>,
    pub bonuses: BTreeMap<Archetype, StrategyBonus>,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        let factions = BTreeMap::from([
            (FactionType::Cultists, Archetype::Expansionist),
            (FactionType::Orcs, Archetype::Aggressor),
            (FactionType::Bandits, Archetype::Raider),
            (FactionType::Necromancers, Archetype::Defensive),
            (FactionType::Beasts, Archetype::Territorial),
        ]);
        let bonus = |expansion, fortification, raiding, retreat_penalty| StrategyBonus {
            expansion,
            fortification,
            raiding,
            retreat_penalty,
        };
        let bonuses = BTreeMap::from([
            (Archetype::Expansionist, bonus(3.0, 0.0, 1.0, 0.0)),
            (Archetype::Aggressor, bonus(2.0, 0.0, 4.0, 0.0)),
            (Archetype::Raider, bonus(0.0, 0.0, 5.0, -2.0)),
            (Archetype::Defensive, bonus(0.0, 2.0, 0.0, 2.0)),
            (Archetype::Territorial, bonus(-1.0, 1.0, 0.0, -3.0)),
        ]);
        Self { factions, bonuses }
    }
}

impl ArchetypeConfig {
    /// Unconfigured faction types behave as `Defensive`.
    pub fn archetype_of(&self, faction: FactionType) -> Archetype {
        self.factions
            .get(&faction)
            .copied()
            .unwrap_or(Archetype::Defensive)
    }

    pub fn bonus_for(&self, faction: FactionType) -> StrategyBonus {
        self.bonuses
            .get(&self.archetype_of(faction))
            .copied()
            .unwrap_or_default()
    }
}

/// Percent chances (0-100) of spawning a threat as a side effect of an intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnChances {
    pub expansion_threat_chance: u32,
    pub fortify_threat_chance: u32,
}

impl Default for SpawnChances {
    fn default() -> Self {
        Self {
            expansion_threat_chance: 20,
            fortify_threat_chance: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatTypeParams {
    pub base_growth_rate: f64,
    pub base_radius: i32,
    pub primary_effect: InfluenceEffect,
    pub can_spawn_children: bool,
    /// Fallback encounter when the owning faction has no encounter pool.
    pub encounter_id: String,
    pub cost: ResourceCost,
}

impl Default for ThreatTypeParams {
    fn default() -> Self {
        Self {
            base_growth_rate: 0.05,
            base_radius: 2,
            primary_effect: InfluenceEffect::SpawnBoost,
            can_spawn_children: false,
            encounter_id: "default".to_string(),
            cost: ResourceCost::FREE,
        }
    }
}

fn stock_threat_types() -> BTreeMap<ThreatType, ThreatTypeParams> {
    let params = |rate, radius, effect, children, encounter: &str, gold, iron| ThreatTypeParams {
        base_growth_rate: rate,
        base_radius: radius,
        primary_effect: effect,
        can_spawn_children: children,
        encounter_id: encounter.to_string(),
        cost: ResourceCost {
            gold,
            iron,
            ..ResourceCost::default()
        },
    };
    BTreeMap::from([
        (
            ThreatType::Necromancer,
            params(0.05, 3, InfluenceEffect::SpawnBoost, true, "necromancer", 20, 5),
        ),
        (
            ThreatType::BanditCamp,
            params(0.08, 2, InfluenceEffect::ResourceDrain, false, "bandit_camp", 10, 5),
        ),
        (
            ThreatType::Corruption,
            params(0.03, 5, InfluenceEffect::TerrainCorruption, true, "corruption", 15, 0),
        ),
        (
            ThreatType::BeastNest,
            params(0.06, 2, InfluenceEffect::SpawnBoost, false, "beast_nest", 5, 0),
        ),
        (
            ThreatType::OrcWarband,
            params(0.07, 3, InfluenceEffect::CombatDebuff, false, "orc_warband", 15, 10),
        ),
    ])
}

fn stock_encounter_pools() -> BTreeMap<FactionType, Vec<String>> {
    let pool = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (
            FactionType::Necromancers,
            pool(&["skeleton_patrol", "ghoul_pack", "necromancer_coven"]),
        ),
        (
            FactionType::Bandits,
            pool(&["highway_robbers", "bandit_raiders"]),
        ),
        (FactionType::Beasts, pool(&["wolf_pack", "dire_bears"])),
        (
            FactionType::Orcs,
            pool(&["orc_scouts", "orc_warband", "orc_warlord"]),
        ),
        (FactionType::Cultists, pool(&["corrupted_cultists"])),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    pub synergy_bonus: f64,
    pub competition_penalty: f64,
    pub suppression_penalty: f64,
    /// Per player-node-type multiplier on the suppression penalty.
    pub suppression_multipliers: BTreeMap<String, f64>,
    /// Bonus between two friendly nodes.
    pub player_boost_bonus: f64,
    /// Bonus between two friendly nodes whose types appear together in `complementary_pairs`.
    pub complementary_bonus: f64,
    pub complementary_pairs: Vec<[String; 2]>,
    pub player_node_radius: i32,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            synergy_bonus: 0.1,
            competition_penalty: 0.1,
            suppression_penalty: 0.2,
            suppression_multipliers: BTreeMap::from([
                ("town".to_string(), 1.0),
                ("watchtower".to_string(), 1.5),
                ("fortress".to_string(), 2.0),
            ]),
            player_boost_bonus: 0.05,
            complementary_bonus: 0.15,
            complementary_pairs: vec![
                ["town".to_string(), "watchtower".to_string()],
                ["watchtower".to_string(), "fortress".to_string()],
            ],
            player_node_radius: 3,
        }
    }
}

impl InfluenceConfig {
    pub fn suppression_multiplier(&self, node_type: &str) -> f64 {
        self.suppression_multipliers
            .get(node_type)
            .copied()
            .unwrap_or(1.0)
    }

    /// Pair order does not matter.
    pub fn is_complementary(&self, a: &str, b: &str) -> bool {
        self.complementary_pairs
            .iter()
            .any(|[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    pub fn player_boost(&self, a: &str, b: &str) -> f64 {
        if self.is_complementary(a, b) {
            self.complementary_bonus
        } else {
            self.player_boost_bonus
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryThresholds {
    pub max_threat_influence: f64,
    pub high_intensity_threshold: i32,
    pub max_high_intensity_threats: usize,
}

impl Default for VictoryThresholds {
    fn default() -> Self {
        Self {
            max_threat_influence: 100.0,
            high_intensity_threshold: 8,
            max_high_intensity_threats: 10,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            threat_growth: ThreatGrowthConfig::default(),
            faction_ai: FactionAiConfig::default(),
            strength_thresholds: StrengthThresholds::default(),
            scoring: ScoringConfig::default(),
            archetypes: ArchetypeConfig::default(),
            spawn: SpawnChances::default(),
            threat_types: stock_threat_types(),
            encounter_pools: stock_encounter_pools(),
            influence: InfluenceConfig::default(),
            victory: VictoryThresholds::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width <= 0 || self.map.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "map must be non-empty, got {}x{}",
                self.map.width, self.map.height
            )));
        }
        if self.threat_growth.max_intensity < 1 {
            return Err(ConfigError::Invalid(
                "threat_growth.max_intensity must be at least 1".to_string(),
            ));
        }
        if self.threat_growth.child_spawn_threshold < 1 {
            return Err(ConfigError::Invalid(
                "threat_growth.child_spawn_threshold must be at least 1".to_string(),
            ));
        }
        if self.faction_ai.default_intent_ticks < 1 {
            return Err(ConfigError::Invalid(
                "faction_ai.default_intent_ticks must be at least 1".to_string(),
            ));
        }
        let t = &self.strength_thresholds;
        if !(t.critical <= t.weak && t.weak <= t.strong) {
            return Err(ConfigError::Invalid(format!(
                "strength thresholds must satisfy critical <= weak <= strong, got {}/{}/{}",
                t.critical, t.weak, t.strong
            )));
        }
        Ok(())
    }

    /// Parameters for a threat type, falling back to neutral defaults when unconfigured.
    pub fn threat_params(&self, threat_type: ThreatType) -> ThreatTypeParams {
        self.threat_types
            .get(&threat_type)
            .cloned()
            .unwrap_or_default()
    }

    pub fn encounter_pool(&self, faction: FactionType) -> &[String] {
        self.encounter_pools
            .get(&faction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn magnitude_for(&self, intensity: i32) -> f64 {
        f64::from(intensity) * self.threat_growth.magnitude_per_intensity
    }
}
