#![allow(dead_code)]

use bevy_app::App;
use bevy_ecs::entity::Entity;
use overworld_sim::ecs::systems::create_faction;
use overworld_sim::ecs::{
    EventLog, SimulationConfig, TickResult, advance_tick, build_overworld_app_seeded,
};
use overworld_sim::model::{EventKind, FactionType, TilePos};

/// Four factions spread across the map, well apart from each other.
pub fn standard_app(seed: u64) -> (App, Vec<Entity>) {
    app_with_config(SimulationConfig::default(), seed)
}

pub fn app_with_config(config: SimulationConfig, seed: u64) -> (App, Vec<Entity>) {
    let mut app = build_overworld_app_seeded(config, seed);
    let world = app.world_mut();
    let factions = vec![
        create_faction(world, FactionType::Cultists, TilePos::new(15, 15), 5),
        create_faction(world, FactionType::Orcs, TilePos::new(80, 15), 8),
        create_faction(world, FactionType::Bandits, TilePos::new(15, 60), 9),
        create_faction(world, FactionType::Necromancers, TilePos::new(80, 60), 2),
    ];
    (app, factions)
}

/// Advance `n` ticks with no player presence.
pub fn run_ticks(app: &mut App, n: usize) -> Vec<TickResult> {
    (0..n)
        .map(|_| advance_tick(app.world_mut(), &[]).unwrap())
        .collect()
}

/// The journal reduced to comparable tuples.
pub fn journal(app: &App) -> Vec<(u64, EventKind, Option<u64>, String)> {
    app.world()
        .resource::<EventLog>()
        .events
        .iter()
        .map(|e| (e.tick, e.kind, e.entity, e.description.clone()))
        .collect()
}
