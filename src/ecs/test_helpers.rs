use bevy_app::App;
use bevy_ecs::world::World;

use super::app::{build_overworld_app_seeded, insert_overworld_resources};
use super::resources::SimulationConfig;
use super::tick::advance_tick;

/// A bare world with the stock config and the given seed. No tick schedule.
pub fn setup_world(seed: u64) -> World {
    let mut world = World::new();
    insert_overworld_resources(&mut world, SimulationConfig::default(), seed);
    world
}

/// A full overworld app with the stock config and the given seed.
pub fn setup_app(seed: u64) -> App {
    build_overworld_app_seeded(SimulationConfig::default(), seed)
}

/// Advance `n` ticks with no player presence.
pub fn run_ticks(app: &mut App, n: u64) {
    for _ in 0..n {
        advance_tick(app.world_mut(), &[]).expect("tick should succeed");
    }
}
