//! Intent scoring. Every function is pure over (faction state, config).

use crate::ecs::components::OverworldFaction;
use crate::ecs::resources::SimulationConfig;
use crate::model::FactionIntent;

pub fn score_expansion(faction: &OverworldFaction, config: &SimulationConfig) -> f64 {
    let rules = &config.scoring.expansion;
    let max_territory = config.faction_ai.max_territory_size;
    let mut score = 0.0;

    if faction.strength >= config.strength_thresholds.strong {
        score += rules.strong_bonus;
    }
    if faction.territory_size < max_territory * 2 / 3 {
        score += rules.small_territory_bonus;
    }
    if faction.territory_size >= max_territory {
        score += rules.max_territory_penalty;
    }
    score + config.archetypes.bonus_for(faction.faction_type).expansion
}

pub fn score_fortification(faction: &OverworldFaction, config: &SimulationConfig) -> f64 {
    let rules = &config.scoring.fortification;
    let mut score = rules.base_value;
    if faction.strength < config.strength_thresholds.weak {
        score += rules.weak_bonus;
    }
    score + config.archetypes.bonus_for(faction.faction_type).fortification
}

/// Zero below the strong threshold, whatever the archetype says.
pub fn score_raiding(faction: &OverworldFaction, config: &SimulationConfig) -> f64 {
    let strong = config.strength_thresholds.strong;
    if faction.strength < strong {
        return 0.0;
    }
    let rules = &config.scoring.raiding;
    let mut score = config.archetypes.bonus_for(faction.faction_type).raiding;
    if faction.strength > strong + rules.very_strong_offset {
        score += rules.strong_bonus;
    }
    score
}

pub fn score_retreat(faction: &OverworldFaction, config: &SimulationConfig) -> f64 {
    let rules = &config.scoring.retreat;
    let mut score = 0.0;
    if faction.strength < config.strength_thresholds.critical {
        score += rules.critical_weak_bonus;
    }
    if faction.territory_size <= rules.min_territory_size {
        score += rules.small_territory_penalty;
    }
    score - config.archetypes.bonus_for(faction.faction_type).retreat_penalty
}

/// Highest-scoring intent, earlier candidates winning ties. Idle when even
/// the best score is under the idle threshold.
pub fn choose_intent(faction: &OverworldFaction, config: &SimulationConfig) -> (FactionIntent, f64) {
    let candidates = [
        (FactionIntent::Expand, score_expansion(faction, config)),
        (FactionIntent::Fortify, score_fortification(faction, config)),
        (FactionIntent::Raid, score_raiding(faction, config)),
        (FactionIntent::Retreat, score_retreat(faction, config)),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }

    if best.1 < config.faction_ai.idle_score_threshold {
        (FactionIntent::Idle, best.1)
    } else {
        best
    }
}
