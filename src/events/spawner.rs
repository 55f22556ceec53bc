//! Spawner completion events.
//!
//! Re-triggered from the spawner callbacks by
//! [`forward_spawner_notices`](crate::systems::spawner::forward_spawner_notices).

use bevy_ecs::prelude::*;

use crate::resources::grid::GridPos;

/// A dragged spawner was dropped onto a free cell.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnerMovedEvent {
    pub spawner: Entity,
    pub cell: GridPos,
}

/// The spawn stack ran out of valid cells.
#[derive(Event, Debug, Clone, Copy)]
pub struct AllItemsSpawnedEvent {
    pub spawner: Entity,
}
