//! Tile coordinates and the pure spatial helpers built on them.

use std::fmt;

use bevy_ecs::component::Component;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A logical tile on the overworld grid.
///
/// Also used as the position component of threat and player nodes.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// North, east, south, west.
    pub fn cardinal_neighbors(&self) -> [TilePos; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    pub fn manhattan_distance(&self, other: &TilePos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn chebyshev_distance(&self, other: &TilePos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pick a tile uniformly at random. `None` for an empty slice.
pub fn random_tile<R: Rng + ?Sized>(tiles: &[TilePos], rng: &mut R) -> Option<TilePos> {
    if tiles.is_empty() {
        return None;
    }
    Some(tiles[rng.random_range(0..tiles.len())])
}
