//! World and schedule setup.
//!
//! [`build_world`] inserts every resource, registers the observers, subscribes
//! the camera rig, places the spawner and fits the zoom to the board.
//! [`build_schedule`] returns the per-frame pipeline. The binary drives both;
//! the integration tests drive them without a window.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Vector3;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::spawner::Spawner;
use crate::events::grid::GridResizedEvent;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::camerarig::{CameraRig, MIN_ZOOM_THRESHOLD};
use crate::resources::gameconfig::GameConfig;
use crate::resources::grid::{GridAccess, GridBoard, GridPos};
use crate::resources::gridlayout::GridLayoutData;
use crate::resources::input::{InputState, PointerState};
use crate::resources::screensize::ScreenSize;
use crate::resources::spawnerbridge::SpawnerBridge;
use crate::resources::ui::{UiState, ZoomSlider};
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::{
    camera_aspect_system, camera_follow_system, grid_resized_observer, subscribe_camera_rig,
    zoom_sync_system,
};
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::input::{key_actions_system, keyboard_pan_system, pointer_pan_system};
use crate::systems::spawner::{
    all_items_spawned_observer, forward_spawner_notices, spawn_job_system,
    spawn_request_observer, spawner_drag_system, spawner_moved_observer,
};
use crate::systems::ui::zoom_slider_system;

/// Camera distance from the board plane.
pub const CAMERA_DEPTH: f32 = -10.0;
/// Spawner grab box, in cells.
pub const SPAWNER_SIZE: f32 = 0.9;

/// Build a ready-to-run world for `layout`.
///
/// Fails only when the layout itself is malformed.
pub fn build_world(
    config: GameConfig,
    layout: &GridLayoutData,
    screen: ScreenSize,
) -> Result<World, String> {
    layout.validate()?;
    let board = GridBoard::from_layout(layout)?;
    let (width, height) = (board.width(), board.height());
    let spawner_cell = layout.spawner_cell();

    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(PointerState {
        is_touch: config.touch_device,
        ..PointerState::default()
    });
    world.insert_resource(UiState::default());
    world.insert_resource(ZoomSlider::default());
    world.insert_resource(screen);
    world.insert_resource(
        CameraRig::new(
            Vector3::new(0.0, 0.0, CAMERA_DEPTH),
            MIN_ZOOM_THRESHOLD,
            screen.aspect(),
        )
        .with_tuning(config.camera_tuning()),
    );
    world.insert_resource(SpawnerBridge::new());
    world.insert_resource(board);
    let spawn_duration = config.spawn_duration;
    world.insert_resource(config);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(spawn_request_observer));
    world.spawn(Observer::new(spawner_moved_observer));
    world.spawn(Observer::new(all_items_spawned_observer));
    world.spawn(Observer::new(grid_resized_observer));
    subscribe_camera_rig(&mut world);
    // Ensure the observers are registered before anything triggers events.
    world.flush();

    spawn_spawner(&mut world, spawner_cell, spawn_duration)?;
    world.trigger(GridResizedEvent { width, height });
    world.flush();

    info!(
        "World ready: {}x{} grid, spawner at ({}, {})",
        width, height, spawner_cell.x, spawner_cell.y
    );
    Ok(world)
}

/// Place a spawner on `cell`, wire its callbacks and build the spawn stack
/// around it.
pub fn spawn_spawner(world: &mut World, cell: GridPos, duration: f32) -> Result<Entity, String> {
    let position = {
        let grid = world.resource::<GridBoard>();
        match grid.cell(cell) {
            Some(c) if !c.blocked => c.position,
            Some(_) => return Err(format!("Spawner cell ({}, {}) is blocked", cell.x, cell.y)),
            None => {
                return Err(format!(
                    "Spawner cell ({}, {}) is outside the grid",
                    cell.x, cell.y
                ));
            }
        }
    };

    let entity = world
        .spawn((
            Spawner::new(duration),
            MapPosition::from_vec(position),
            BoxCollider::centered(SPAWNER_SIZE, SPAWNER_SIZE),
        ))
        .id();
    world.resource_scope(|world, bridge: Mut<SpawnerBridge>| {
        if let Some(mut spawner) = world.get_mut::<Spawner>(entity) {
            bridge.wire(&mut spawner, entity);
        }
    });
    world.resource_mut::<GridBoard>().fill_spawn_stack(cell);
    Ok(entity)
}

/// Per-frame pipeline. Time and hardware polling happen before it runs.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            apply_gameconfig_changes,
            camera_aspect_system,
            key_actions_system,
            zoom_slider_system,
            pointer_pan_system,
            keyboard_pan_system,
            camera_follow_system,
            zoom_sync_system,
            spawner_drag_system,
            spawn_job_system,
            forward_spawner_notices,
        )
            .chain(),
    );
    update
}
