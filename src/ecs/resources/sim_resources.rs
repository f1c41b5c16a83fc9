use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::{DefeatReason, FactionType, VictoryCondition};

/// Deterministic RNG for the overworld.
#[derive(Resource)]
pub struct OverworldRng {
    pub rng: SmallRng,
    pub seed: u64,
}

impl OverworldRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restart the stream for a deterministic replay.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Uniform integer in `0..n`. Returns 0 when `n` is 0.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }

    /// Roll a percent chance in 0..=100.
    pub fn percent(&mut self, chance: u32) -> bool {
        self.rng.random_range(0..100) < chance
    }
}

/// Tick counter plus the game-over latch.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickState {
    pub current_tick: u64,
    pub game_over: bool,
}

/// Win/loss targets for the session and the outcome once decided.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct VictoryState {
    /// Survival mode when non-zero: the player wins on reaching this tick.
    pub ticks_to_survive: u64,
    pub target_faction: Option<FactionType>,
    pub achieved: bool,
    pub condition: VictoryCondition,
    pub defeat_reason: DefeatReason,
    pub defeat_message: String,
}
