//! Channel bridge between spawner callbacks and the ECS.
//!
//! [`Spawner`](crate::components::spawner::Spawner) reports completion through
//! plain closures that cannot reach the world. [`SpawnerBridge::wire`] binds
//! closures that push a [`SpawnerNotice`] into a crossbeam channel; the
//! [`forward_spawner_notices`](crate::systems::spawner::forward_spawner_notices)
//! system drains it each frame and re-triggers the notices as ECS events.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;

use crate::components::spawner::Spawner;
use crate::resources::grid::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerNotice {
    AllItemsSpawned { spawner: Entity },
    Moved { spawner: Entity, cell: GridPos },
}

#[derive(Resource)]
pub struct SpawnerBridge {
    tx: Sender<SpawnerNotice>,
    rx: Receiver<SpawnerNotice>,
}

impl Default for SpawnerBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnerBridge {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<SpawnerNotice>();
        Self { tx, rx }
    }

    /// Bind `spawner`'s callbacks so they report into this bridge as `entity`.
    pub fn wire(&self, spawner: &mut Spawner, entity: Entity) {
        let tx_all = self.tx.clone();
        let tx_moved = self.tx.clone();
        spawner.initialize(
            move || {
                // Receiver lives as long as the world; ignore send error on teardown
                let _ = tx_all.send(SpawnerNotice::AllItemsSpawned { spawner: entity });
            },
            move |cell| {
                let _ = tx_moved.send(SpawnerNotice::Moved {
                    spawner: entity,
                    cell,
                });
            },
        );
        trace!("Spawner {:?} wired to bridge", entity);
    }

    /// Take every pending notice.
    pub fn drain(&self) -> Vec<SpawnerNotice> {
        self.rx.try_iter().collect()
    }
}
