//! Spawner systems and observers.
//!
//! - [`spawner_drag_system`] runs the drag state machine of every spawner
//!   under (or holding) the pointer.
//! - [`spawn_request_observer`] asks each spawner for its next item.
//! - [`spawn_job_system`] advances in-flight spawn moves and writes the item
//!   positions.
//! - [`forward_spawner_notices`] drains the callback bridge into ECS events,
//!   handled by [`spawner_moved_observer`] and [`all_items_spawned_observer`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{debug, info, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::item::Item;
use crate::components::mapposition::MapPosition;
use crate::components::spawner::{SpawnOutcome, Spawner};
use crate::events::input::SpawnRequestEvent;
use crate::events::spawner::{AllItemsSpawnedEvent, SpawnerMovedEvent};
use crate::resources::camerarig::CameraRig;
use crate::resources::grid::GridBoard;
use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;
use crate::resources::spawnerbridge::{SpawnerBridge, SpawnerNotice};
use crate::resources::ui::{UiInteraction, UiState};
use crate::resources::worldtime::WorldTime;

pub fn spawner_drag_system(
    pointer: Res<PointerState>,
    rig: Res<CameraRig>,
    screen: Res<ScreenSize>,
    ui: Res<UiState>,
    grid: Res<GridBoard>,
    mut spawners: Query<(&mut Spawner, &mut MapPosition, &BoxCollider)>,
) {
    let cursor_world = rig.view(*screen).screen_to_world(pointer.screen);
    for (mut spawner, mut position, collider) in spawners.iter_mut() {
        if ui.is_ui_being_interacted() && !spawner.is_dragging() {
            continue;
        }
        if !spawner.is_mouse_over_or_dragging(position.pos, collider, cursor_world) {
            continue;
        }
        let mut pos = position.pos;
        spawner.handle_drag(&mut pos, cursor_world, pointer.primary, &*grid);
        if pos != position.pos {
            position.pos = pos;
        }
    }
}

pub fn spawn_request_observer(
    _trigger: On<SpawnRequestEvent>,
    mut commands: Commands,
    mut grid: ResMut<GridBoard>,
    mut spawners: Query<(&mut Spawner, &MapPosition)>,
    mut rng: Local<Rng>,
) {
    for (mut spawner, position) in spawners.iter_mut() {
        match spawner.spawn(position.pos, &mut *grid, &mut commands, &mut rng) {
            SpawnOutcome::Started { item, cell } => {
                debug!("Item {:?} heading to ({}, {})", item, cell.x, cell.y);
            }
            SpawnOutcome::Busy => debug!("Spawner busy, request dropped"),
            SpawnOutcome::Exhausted | SpawnOutcome::NoStack | SpawnOutcome::NoPalette => {}
        }
    }
}

/// Advance in-flight spawn moves.
pub fn spawn_job_system(
    time: Res<WorldTime>,
    mut spawners: Query<&mut Spawner>,
    mut items: Query<&mut MapPosition, (With<Item>, Without<Spawner>)>,
) {
    for mut spawner in spawners.iter_mut() {
        if spawner.active_job().is_none() {
            continue;
        }
        let Some(progress) = spawner.tick(time.delta) else {
            continue;
        };
        match items.get_mut(progress.item) {
            Ok(mut position) => position.pos = progress.position,
            Err(_) => warn!("Spawned item {:?} no longer exists", progress.item),
        }
    }
}

/// Re-trigger spawner callback notices as ECS events.
pub fn forward_spawner_notices(bridge: Res<SpawnerBridge>, mut commands: Commands) {
    for notice in bridge.drain() {
        match notice {
            SpawnerNotice::AllItemsSpawned { spawner } => {
                commands.trigger(AllItemsSpawnedEvent { spawner });
            }
            SpawnerNotice::Moved { spawner, cell } => {
                commands.trigger(SpawnerMovedEvent { spawner, cell });
            }
        }
    }
}

/// Reorder the spawn stack around the spawner's new cell.
pub fn spawner_moved_observer(trigger: On<SpawnerMovedEvent>, mut grid: ResMut<GridBoard>) {
    let event = trigger.event();
    grid.fill_spawn_stack(event.cell);
    info!(
        "Spawner {:?} moved to ({}, {})",
        event.spawner, event.cell.x, event.cell.y
    );
}

pub fn all_items_spawned_observer(trigger: On<AllItemsSpawnedEvent>) {
    info!("Spawner {:?}: board is full", trigger.event().spawner);
}
