use std::marker::PhantomData;

use bevy_app::{App, Plugin};
use bevy_ecs::resource::Resource;

use super::garrison::{GarrisonRoster, GarrisonService};
use super::systems::{FactionsPlugin, InfluencePlugin, ThreatsPlugin};

/// Aggregate plugin that installs every overworld step into `OverworldTick`.
///
/// `G` is the garrison service resource handed to the faction step.
pub struct OverworldPlugin<G = GarrisonRoster> {
    marker: PhantomData<fn() -> G>,
}

impl<G> Default for OverworldPlugin<G> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<G: GarrisonService + Resource> Plugin for OverworldPlugin<G> {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ThreatsPlugin,
            InfluencePlugin,
            FactionsPlugin::<G>::default(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::entity::Entity;
    use bevy_ecs::schedule::ExecutorKind;
    use bevy_ecs::world::World;

    use super::*;
    use crate::ecs::app::insert_overworld_resources;
    use crate::ecs::resources::{SimulationConfig, TickState};
    use crate::ecs::schedule::configure_overworld_schedule;
    use crate::ecs::systems::{create_faction, create_player_node};
    use crate::ecs::tick::advance_tick;
    use crate::model::{FactionType, TilePos};

    /// A host-side garrison service that reports every node as defended.
    #[derive(Resource, Default)]
    struct FortifiedEverywhere;

    impl GarrisonService for FortifiedEverywhere {
        fn is_node_garrisoned(&self, _node: Entity) -> bool {
            true
        }

        fn create_npc_garrison(&mut self, _node: Entity, _faction: FactionType, _strength: i32) {}

        fn remove_garrison(&mut self, _node: Entity) {}

        fn find_player_nodes_near_faction(&self, world: &World, owned_tiles: &[TilePos]) -> Vec<Entity> {
            GarrisonRoster::new().find_player_nodes_near_faction(world, owned_tiles)
        }
    }

    #[test]
    fn custom_garrison_service_drives_raids() {
        let mut app = App::empty();
        app.add_schedule(configure_overworld_schedule(ExecutorKind::SingleThreaded));
        let mut config = SimulationConfig::default();
        config.faction_ai.default_intent_ticks = 1;
        config.scoring.raiding.strong_bonus = 100.0;
        insert_overworld_resources(app.world_mut(), config, 3);
        app.add_plugins(OverworldPlugin::<FortifiedEverywhere>::default());

        app.insert_resource(FortifiedEverywhere);

        let world = app.world_mut();
        create_faction(world, FactionType::Orcs, TilePos::new(10, 10), 12);
        let node = create_player_node(world, TilePos::new(11, 10), "fortress");

        let result = advance_tick(world, &[]).unwrap();

        assert_eq!(result.pending_raid.map(|r| r.target_node), Some(node));
        assert_eq!(world.resource::<TickState>().current_tick, 1);
        assert!(world.contains_resource::<FortifiedEverywhere>());
    }
}
