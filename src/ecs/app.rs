use bevy_app::App;
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::ExecutorKind;
use bevy_ecs::world::World;

use super::garrison::{GarrisonRoster, GarrisonService};
use super::plugin::OverworldPlugin;
use super::resources::{EventLog, OverworldRng, SimulationConfig, ThreatIndex, TickState};
use super::schedule::configure_overworld_schedule;
use super::tick::PlayerPresence;

/// Default seed for [`build_overworld_app`].
pub const DEFAULT_SEED: u64 = 42;

/// Build a headless Bevy app with the overworld schedule, resources and
/// systems installed, using the in-crate [`GarrisonRoster`].
///
/// Each turn is one call to [`advance_tick`](super::advance_tick):
/// ```no_run
/// # use overworld_sim::ecs::{build_overworld_app, advance_tick, SimulationConfig};
/// # use overworld_sim::model::TilePos;
/// let mut app = build_overworld_app(SimulationConfig::default());
/// let squads = [TilePos::new(40, 30)];
/// for _ in 0..100 {
///     advance_tick(app.world_mut(), &squads).unwrap();
/// }
/// ```
pub fn build_overworld_app(config: SimulationConfig) -> App {
    build_overworld_app_seeded(config, DEFAULT_SEED)
}

/// Build a headless Bevy app with a specific RNG seed.
pub fn build_overworld_app_seeded(config: SimulationConfig, seed: u64) -> App {
    build_overworld_app_with_garrisons(config, seed, GarrisonRoster::new())
}

/// Build a headless Bevy app whose faction AI consults the host's own
/// garrison service, stored as a resource.
pub fn build_overworld_app_with_garrisons<G: GarrisonService + Resource>(
    config: SimulationConfig,
    seed: u64,
    garrisons: G,
) -> App {
    let mut app = App::empty();
    app.add_schedule(configure_overworld_schedule(ExecutorKind::SingleThreaded));
    insert_overworld_resources(app.world_mut(), config, seed);
    app.insert_resource(garrisons);
    app.add_plugins(OverworldPlugin::<G>::default());
    app
}

/// Install the resources every overworld operation expects.
pub fn insert_overworld_resources(world: &mut World, config: SimulationConfig, seed: u64) {
    world.insert_resource(config);
    world.insert_resource(TickState::default());
    world.insert_resource(EventLog::new());
    world.insert_resource(ThreatIndex::new());
    world.insert_resource(OverworldRng::new(seed));
    world.insert_resource(PlayerPresence::default());
}
