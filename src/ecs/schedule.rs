use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::conditions::tick_healthy;

/// Schedule label for one overworld turn.
/// Driven by [`advance_tick`](super::advance_tick), which bumps the tick
/// counter and collects the outcome around each run.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverworldTick;

/// Ordered steps within each overworld turn.
///
/// ```text
/// Containment → Influence → Threats → Factions
/// ```
///
/// Every step after containment is skipped once an earlier step has failed.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverworldPhase {
    Containment,
    Influence,
    Threats,
    Factions,
}

/// Build a configured `OverworldTick` schedule with phase ordering.
pub fn configure_overworld_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(OverworldTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            OverworldPhase::Containment,
            OverworldPhase::Influence,
            OverworldPhase::Threats,
            OverworldPhase::Factions,
        )
            .chain(),
    );
    schedule.configure_sets(OverworldPhase::Influence.run_if(tick_healthy));
    schedule.configure_sets(OverworldPhase::Threats.run_if(tick_healthy));
    schedule.configure_sets(OverworldPhase::Factions.run_if(tick_healthy));
    schedule
}
