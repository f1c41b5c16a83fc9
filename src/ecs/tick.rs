//! The overworld turn: one call advances every subsystem by one tick.

use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;

use crate::ecs::resources::TickState;
use crate::ecs::schedule::OverworldTick;
use crate::ecs::systems::PendingRaid;
use crate::error::TickError;
use crate::model::TilePos;

/// Positions of player presence (squads, commanders) for the current tick.
/// Threats near these are contained.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPresence {
    pub positions: Vec<TilePos>,
}

/// What the steps of the current tick report back to [`advance_tick`].
///
/// Reset at the start of every tick.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub pending_raid: Option<PendingRaid>,
    pub error: Option<TickError>,
}

impl TickOutcome {
    /// Record a failed step. Only the first failure of a tick is kept.
    pub fn fail(&mut self, error: TickError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Offer a launched raid. Only the first raid of a tick is kept.
    pub fn offer_raid(&mut self, raid: PendingRaid) {
        if self.pending_raid.is_none() {
            self.pending_raid = Some(raid);
        }
    }
}

/// Record a step failure from inside an exclusive system.
pub(crate) fn record_failure(world: &mut World, error: TickError) {
    tracing::warn!(%error, "overworld step failed");
    world
        .get_resource_or_insert_with(TickOutcome::default)
        .fail(error);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Tick that was processed. 0 when the game is already over.
    pub tick: u64,
    /// Raid that needs combat resolution, if any faction launched one.
    pub pending_raid: Option<PendingRaid>,
}

/// Advance the overworld by one tick.
///
/// Once `TickState::game_over` is set this is a no-op returning an empty
/// result. Otherwise the counter is incremented first and stays incremented
/// even if a later step fails. The `OverworldTick` schedule then runs
/// containment, influence, threats and factions in that order. Victory is
/// left to the caller.
pub fn advance_tick(world: &mut World, player_positions: &[TilePos]) -> Result<TickResult, TickError> {
    let tick = {
        let mut state = world
            .get_resource_mut::<TickState>()
            .ok_or(TickError::MissingTickState)?;
        if state.game_over {
            return Ok(TickResult::default());
        }
        state.current_tick += 1;
        state.current_tick
    };
    let _span = tracing::debug_span!("overworld_tick", tick).entered();

    world.insert_resource(PlayerPresence {
        positions: player_positions.to_vec(),
    });
    world.insert_resource(TickOutcome::default());
    world
        .try_run_schedule(OverworldTick)
        .map_err(|_| TickError::MissingSchedule)?;

    let outcome = world.remove_resource::<TickOutcome>().unwrap_or_default();
    if let Some(error) = outcome.error {
        return Err(error);
    }
    if let Some(raid) = &outcome.pending_raid {
        tracing::debug!(
            faction = %raid.attacking_faction,
            strength = raid.attacking_strength,
            target = ?raid.target_node,
            "raid pending"
        );
    }
    Ok(TickResult {
        tick,
        pending_raid: outcome.pending_raid,
    })
}
