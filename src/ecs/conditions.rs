use bevy_ecs::system::Res;

use super::tick::TickOutcome;

/// Bevy run condition: no step of the current tick has failed yet.
pub fn tick_healthy(outcome: Option<Res<TickOutcome>>) -> bool {
    outcome.is_none_or(|o| o.error.is_none())
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;

    use super::*;
    use crate::error::TickError;

    fn healthy(world: &mut World) -> bool {
        world
            .run_system_cached(tick_healthy)
            .expect("condition should run")
    }

    #[test]
    fn healthy_until_a_step_fails() {
        let mut world = World::new();
        assert!(healthy(&mut world));

        world.insert_resource(TickOutcome::default());
        assert!(healthy(&mut world));

        world.resource_mut::<TickOutcome>().fail(TickError::MissingTickState);
        assert!(!healthy(&mut world));
    }
}
