use std::collections::{BTreeMap, BTreeSet};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

use crate::model::TilePos;

/// Tile -> threat nodes standing on it.
///
/// Kept in step with the `ThreatNode` components by the create and destroy
/// operations; nothing else writes to it.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThreatIndex {
    by_tile: BTreeMap<TilePos, BTreeSet<Entity>>,
}

impl ThreatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: TilePos, entity: Entity) {
        self.by_tile.entry(pos).or_default().insert(entity);
    }

    pub fn remove(&mut self, pos: TilePos, entity: Entity) -> bool {
        let Some(set) = self.by_tile.get_mut(&pos) else {
            return false;
        };
        let removed = set.remove(&entity);
        if set.is_empty() {
            self.by_tile.remove(&pos);
        }
        removed
    }

    /// Remove `entity` wherever it is indexed. Used when its position is unknown.
    pub fn remove_everywhere(&mut self, entity: Entity) -> bool {
        let mut removed = false;
        self.by_tile.retain(|_, set| {
            removed |= set.remove(&entity);
            !set.is_empty()
        });
        removed
    }

    pub fn is_occupied(&self, pos: TilePos) -> bool {
        self.by_tile.contains_key(&pos)
    }

    pub fn at(&self, pos: TilePos) -> impl Iterator<Item = Entity> + '_ {
        self.by_tile.get(&pos).into_iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.by_tile.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;

    use super::*;

    #[test]
    fn remove_clears_empty_tiles() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut index = ThreatIndex::new();
        let pos = TilePos::new(2, 3);

        index.insert(pos, a);
        index.insert(pos, b);
        assert_eq!(index.at(pos).count(), 2);

        assert!(index.remove(pos, a));
        assert!(index.is_occupied(pos));
        assert!(index.remove_everywhere(b));
        assert!(!index.is_occupied(pos));
        assert!(index.is_empty());
        assert!(!index.remove(pos, b));
    }
}
