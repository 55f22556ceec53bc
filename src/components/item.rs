//! Grid items and how they are created.
//!
//! An item is an entity with an [`Item`] component (its color and the cell it
//! was registered into) and a [`MapPosition`]. The spawner creates items
//! through the [`ItemFactory`] seam so it works both from systems
//! ([`Commands`]) and against a [`World`] directly.

use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector2};

use crate::components::mapposition::MapPosition;
use crate::resources::grid::GridPos;

#[derive(Component, Clone, Copy, Debug)]
pub struct Item {
    pub color: Color,
    pub cell: GridPos,
}

/// Creates item entities for the spawner.
pub trait ItemFactory {
    /// Create an item at world position `at`, bound for `cell`.
    fn instantiate(&mut self, at: Vector2, color: Color, cell: GridPos) -> Entity;
}

fn item_bundle(at: Vector2, color: Color, cell: GridPos) -> (Item, MapPosition) {
    (Item { color, cell }, MapPosition::from_vec(at))
}

impl ItemFactory for Commands<'_, '_> {
    fn instantiate(&mut self, at: Vector2, color: Color, cell: GridPos) -> Entity {
        self.spawn(item_bundle(at, color, cell)).id()
    }
}

impl ItemFactory for World {
    fn instantiate(&mut self, at: Vector2, color: Color, cell: GridPos) -> Entity {
        self.spawn(item_bundle(at, color, cell)).id()
    }
}
