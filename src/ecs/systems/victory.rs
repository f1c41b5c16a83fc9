//! Win and loss evaluation. Called by the host after each tick; the tick
//! orchestrator never runs it on its own.

use bevy_ecs::world::World;
use serde_json::json;

use crate::ecs::resources::{EventLog, SimulationConfig, TickState, VictoryState};
use crate::model::{DefeatReason, EventKind, FactionType, VictoryCondition};

use super::helpers::{current_tick, log_event};
use super::queries::{
    count_threat_nodes, count_threats_at_or_above, factions_by_type, total_threat_influence,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefeatCheck {
    pub is_defeated: bool,
    pub reason: DefeatReason,
    pub message: String,
}

/// Install the session's win targets. `ticks_to_survive == 0` disables survival mode.
pub fn init_victory_state(
    world: &mut World,
    ticks_to_survive: u64,
    target_faction: Option<FactionType>,
) {
    world.insert_resource(VictoryState {
        ticks_to_survive,
        target_faction,
        ..VictoryState::default()
    });
}

/// Checks run in a fixed order and only the first failing one is reported.
pub fn check_player_defeat(world: &World) -> DefeatCheck {
    let Some(config) = world.get_resource::<SimulationConfig>() else {
        return DefeatCheck::default();
    };
    let limits = &config.victory;

    let influence = total_threat_influence(world);
    if influence > limits.max_threat_influence {
        return DefeatCheck {
            is_defeated: true,
            reason: DefeatReason::Influence,
            message: format!(
                "Threat influence {influence:.0} exceeded {:.0}",
                limits.max_threat_influence
            ),
        };
    }

    let high = count_threats_at_or_above(world, limits.high_intensity_threshold);
    if high >= limits.max_high_intensity_threats {
        return DefeatCheck {
            is_defeated: true,
            reason: DefeatReason::HighIntensityThreats,
            message: format!(
                "{high} threats reached intensity {} or higher",
                limits.high_intensity_threshold
            ),
        };
    }

    DefeatCheck::default()
}

pub fn has_player_eliminated_all_threats(world: &World) -> bool {
    count_threat_nodes(world) == 0
}

pub fn has_player_defeated_faction_type(world: &World, faction_type: FactionType) -> bool {
    factions_by_type(world, faction_type).is_empty()
}

/// Evaluate the session outcome in priority order: defeat, survival target,
/// all threats eliminated, target faction eliminated.
///
/// While a survival target is set it is authoritative: nothing but defeat or
/// reaching the target tick ends the game. A terminal result is journaled,
/// finalizes the log, and latches `TickState::game_over`.
pub fn check_victory_condition(world: &mut World) -> VictoryCondition {
    let tick = current_tick(world);
    let targets = world
        .get_resource::<VictoryState>()
        .map(|v| (v.ticks_to_survive, v.target_faction));

    let defeat = check_player_defeat(world);
    if defeat.is_defeated {
        if let Some(mut state) = world.get_resource_mut::<VictoryState>() {
            state.condition = VictoryCondition::PlayerLoses;
            state.achieved = true;
            state.defeat_reason = defeat.reason;
            state.defeat_message = defeat.message.clone();
        }
        conclude(world, tick, EventKind::Defeat, "Defeat", &defeat.message);
        return VictoryCondition::PlayerLoses;
    }

    let (ticks_to_survive, target_faction) = targets.unwrap_or((0, None));

    if ticks_to_survive > 0 {
        if tick < ticks_to_survive {
            return VictoryCondition::None;
        }
        let reason = format!("Victory! Survived {ticks_to_survive} ticks");
        achieve(world, VictoryCondition::TimeLimit);
        conclude(world, tick, EventKind::Victory, "Victory", &reason);
        return VictoryCondition::TimeLimit;
    }

    if has_player_eliminated_all_threats(world) {
        achieve(world, VictoryCondition::PlayerWins);
        conclude(
            world,
            tick,
            EventKind::Victory,
            "Victory",
            "Victory! All threats eliminated",
        );
        return VictoryCondition::PlayerWins;
    }

    if let Some(target) = target_faction
        && has_player_defeated_faction_type(world, target)
    {
        let reason = format!("Victory! Defeated all {} factions", target.display_name());
        achieve(world, VictoryCondition::FactionDefeat);
        conclude(world, tick, EventKind::Victory, "Victory", &reason);
        return VictoryCondition::FactionDefeat;
    }

    VictoryCondition::None
}

/// Human-readable status of the current win target.
pub fn victory_progress(world: &World) -> String {
    let Some(state) = world.get_resource::<VictoryState>() else {
        return "No victory condition set".to_string();
    };
    if state.achieved {
        return state.condition.to_string();
    }
    if state.ticks_to_survive > 0 {
        let remaining = state.ticks_to_survive.saturating_sub(current_tick(world));
        return format!("Survive {remaining} more ticks");
    }
    if let Some(target) = state.target_faction {
        let left = factions_by_type(world, target).len();
        return format!("{} factions remaining: {left}", target.display_name());
    }
    format!("Threats remaining: {}", count_threat_nodes(world))
}

fn achieve(world: &mut World, condition: VictoryCondition) {
    if let Some(mut state) = world.get_resource_mut::<VictoryState>() {
        state.condition = condition;
        state.achieved = true;
    }
}

fn conclude(world: &mut World, tick: u64, kind: EventKind, outcome: &str, reason: &str) {
    tracing::info!(tick, outcome, reason, "overworld session concluded");
    log_event(
        world,
        kind,
        tick,
        None,
        reason.to_string(),
        json!({ "outcome": outcome }),
    );
    if let Some(mut log) = world.get_resource_mut::<EventLog>() {
        log.finalize(outcome, reason, tick);
    }
    if let Some(mut state) = world.get_resource_mut::<TickState>() {
        state.game_over = true;
    }
}
