//! Frame pipeline integration tests: a real World built by `build_world`,
//! driven through `build_schedule` with hand-written input.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use gridrig::components::item::Item;
use gridrig::components::mapposition::MapPosition;
use gridrig::components::spawner::Spawner;
use gridrig::events::spawner::{AllItemsSpawnedEvent, SpawnerMovedEvent};
use gridrig::game::{build_schedule, build_world};
use gridrig::resources::camerarig::{CameraRig, MIN_ZOOM_THRESHOLD};
use gridrig::resources::debugmode::DebugMode;
use gridrig::resources::gameconfig::GameConfig;
use gridrig::resources::grid::{GridAccess, GridBoard, GridPos};
use gridrig::resources::gridlayout::GridLayoutData;
use gridrig::resources::input::{ButtonState, InputState, PointerState};
use gridrig::resources::screensize::ScreenSize;
use gridrig::resources::ui::{UiState, ZoomSlider};
use gridrig::systems::camera::{subscribe_camera_rig, unsubscribe_camera_rig};
use gridrig::systems::time::update_world_time;
use gridrig::systems::ui::slider_track;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn square_screen() -> ScreenSize {
    ScreenSize { w: 600, h: 600 }
}

fn make_world(layout: &GridLayoutData) -> (World, Schedule) {
    let world = build_world(GameConfig::new(), layout, square_screen()).unwrap();
    (world, build_schedule())
}

/// One frame: time, schedule, then the per-frame edges are cleared the way
/// the next hardware poll would.
fn frame(world: &mut World, schedule: &mut Schedule) {
    update_world_time(world, DT);
    schedule.run(world);
    world.clear_trackers();
    {
        let mut input = world.resource_mut::<InputState>();
        for key in input.keys_mut() {
            key.just_pressed = false;
            key.just_released = false;
        }
    }
    let mut pointer = world.resource_mut::<PointerState>();
    pointer.primary.pressed = false;
    pointer.primary.released = false;
    pointer.delta = Vector2 { x: 0.0, y: 0.0 };
    pointer.wheel = 0.0;
}

fn frames(world: &mut World, schedule: &mut Schedule, n: usize) {
    for _ in 0..n {
        frame(world, schedule);
    }
}

fn press_spawn(world: &mut World) {
    world.resource_mut::<InputState>().action_spawn.just_pressed = true;
}

fn spawner_entity(world: &mut World) -> Entity {
    let mut q = world.query_filtered::<Entity, With<Spawner>>();
    q.single(world).unwrap()
}

fn item_count(world: &mut World) -> usize {
    world.query::<&Item>().iter(world).count()
}

fn cell_position(world: &World, cell: GridPos) -> Vector2 {
    world.resource::<GridBoard>().cell(cell).unwrap().position
}

fn world_to_screen(world: &World, point: Vector2) -> Vector2 {
    let screen = *world.resource::<ScreenSize>();
    world.resource::<CameraRig>().view(screen).world_to_screen(point)
}

fn set_pointer(world: &mut World, screen: Vector2, delta: Vector2, primary: ButtonState) {
    let mut pointer = world.resource_mut::<PointerState>();
    pointer.screen = screen;
    pointer.delta = delta;
    pointer.primary = primary;
}

const PRESS: ButtonState = ButtonState {
    down: true,
    pressed: true,
    released: false,
};
const HOLD: ButtonState = ButtonState {
    down: true,
    pressed: false,
    released: false,
};
const RELEASE: ButtonState = ButtonState {
    down: false,
    pressed: false,
    released: true,
};

fn count_all_spawned(world: &mut World) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    world.add_observer(move |_trigger: On<AllItemsSpawnedEvent>| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    world.flush();
    count
}

fn record_moves(world: &mut World) -> Arc<Mutex<Vec<GridPos>>> {
    let moves = Arc::new(Mutex::new(Vec::new()));
    let m = moves.clone();
    world.add_observer(move |trigger: On<SpawnerMovedEvent>| {
        m.lock().unwrap().push(trigger.event().cell);
    });
    world.flush();
    moves
}

/// Drag the spawner from its cell to `to` (world) over three frames.
fn drag_spawner_to(world: &mut World, schedule: &mut Schedule, to: Vector2) {
    let spawner = spawner_entity(world);
    let from = world.get::<MapPosition>(spawner).unwrap().pos;
    let from_screen = world_to_screen(world, from);
    let to_screen = world_to_screen(world, to);
    let delta = Vector2 {
        x: to_screen.x - from_screen.x,
        y: to_screen.y - from_screen.y,
    };

    set_pointer(world, from_screen, Vector2 { x: 0.0, y: 0.0 }, PRESS);
    frame(world, schedule);
    set_pointer(world, to_screen, delta, HOLD);
    frame(world, schedule);
    set_pointer(world, to_screen, Vector2 { x: 0.0, y: 0.0 }, RELEASE);
    frame(world, schedule);
}

// ==================== CAMERA ====================

#[test]
fn build_world_fits_zoom_to_the_board() {
    let (world, _) = make_world(&GridLayoutData::open(10, 6));
    let rig = world.resource::<CameraRig>();
    // max(10 / 2, 6 / 2) * 1.1
    assert!(approx_eq(rig.max_zoom(), 5.5));
    assert!(approx_eq(rig.orthographic_size(), 5.5));
    let slider = world.resource::<ZoomSlider>();
    assert!(approx_eq(slider.min(), MIN_ZOOM_THRESHOLD));
    assert!(approx_eq(slider.value(), 5.5));
}

#[test]
fn small_board_keeps_zoom_range_valid() {
    let (world, _) = make_world(&GridLayoutData::open(2, 2));
    let rig = world.resource::<CameraRig>();
    assert!(rig.max_zoom() >= rig.min_zoom());
}

#[test]
fn keyboard_pan_moves_camera_and_settles() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(9, 9));
    world.resource_mut::<InputState>().pan_right.active = true;
    frames(&mut world, &mut schedule, 10);
    world.resource_mut::<InputState>().pan_right.active = false;

    let target = world.resource::<CameraRig>().target();
    assert!(target.x > 0.0);
    assert!(approx_eq(target.y, 0.0));

    frames(&mut world, &mut schedule, 600);
    let rig = world.resource::<CameraRig>();
    assert!(!rig.is_moving());
    let pos = rig.position();
    assert_eq!((pos.x, pos.y, pos.z), (target.x, target.y, target.z));
}

#[test]
fn pointer_drag_on_empty_space_pans_against_the_drag() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(9, 9));
    let far = Vector2 { x: 300.0, y: 40.0 };
    set_pointer(&mut world, far, Vector2 { x: 0.0, y: 0.0 }, PRESS);
    frame(&mut world, &mut schedule);
    assert!(!world.resource::<CameraRig>().is_moving());

    set_pointer(&mut world, far, Vector2 { x: 10.0, y: 0.0 }, HOLD);
    frame(&mut world, &mut schedule);
    let rig = world.resource::<CameraRig>();
    assert!(rig.target().x < 0.0);
    assert!(approx_eq(rig.target().y, 0.0));
}

#[test]
fn dragging_the_slider_zooms_without_panning() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(20, 20));
    let track = slider_track(square_screen());
    let bottom = Vector2 {
        x: track.x + track.width * 0.5,
        y: track.y + track.height,
    };
    set_pointer(&mut world, bottom, Vector2 { x: 0.0, y: 0.0 }, PRESS);
    frame(&mut world, &mut schedule);
    set_pointer(&mut world, bottom, Vector2 { x: 0.0, y: 5.0 }, HOLD);
    frame(&mut world, &mut schedule);

    assert!(world.resource::<UiState>().dragging_slider);
    let rig = world.resource::<CameraRig>();
    assert!(!rig.is_moving());
    assert!(approx_eq(rig.orthographic_size(), MIN_ZOOM_THRESHOLD));
}

#[test]
fn unsubscribed_rig_ignores_input() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(9, 9));
    unsubscribe_camera_rig(&mut world);
    world.resource_mut::<InputState>().pan_up.active = true;
    frames(&mut world, &mut schedule, 5);
    assert!(!world.resource::<CameraRig>().is_moving());

    subscribe_camera_rig(&mut world);
    frame(&mut world, &mut schedule);
    assert!(world.resource::<CameraRig>().target().y > 0.0);
}

#[test]
fn screen_resize_updates_aspect() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(9, 9));
    *world.resource_mut::<ScreenSize>() = ScreenSize { w: 1200, h: 600 };
    frame(&mut world, &mut schedule);
    assert!(approx_eq(world.resource::<CameraRig>().aspect(), 2.0));
}

// ==================== SPAWNER ====================

#[test]
fn spawn_key_places_item_exactly_on_nearest_cell() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(10, 6));
    let spawner = spawner_entity(&mut world);
    let origin = world.get::<MapPosition>(spawner).unwrap().pos;

    press_spawn(&mut world);
    frame(&mut world, &mut schedule);
    assert_eq!(item_count(&mut world), 1);

    frames(&mut world, &mut schedule, 20);
    let (item, position) = {
        let mut q = world.query::<(&Item, &MapPosition)>();
        let (item, position) = q.single(&world).unwrap();
        (*item, position.pos)
    };
    // Spawner sits bottom-left at (0, 5); the row above wins the distance tie.
    assert_eq!(item.cell, GridPos::new(0, 4));
    let expected = cell_position(&world, item.cell);
    assert_eq!((position.x, position.y), (expected.x, expected.y));
    assert!((position.x, position.y) != (origin.x, origin.y));

    let grid = world.resource::<GridBoard>();
    assert!(!grid.is_valid_position(item.cell));
    assert!(world.get::<Spawner>(spawner).unwrap().active_job().is_none());
}

#[test]
fn spawn_request_during_flight_is_dropped() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(5, 5));
    press_spawn(&mut world);
    frame(&mut world, &mut schedule);
    press_spawn(&mut world);
    frame(&mut world, &mut schedule);
    assert_eq!(item_count(&mut world), 1);

    frames(&mut world, &mut schedule, 10);
    press_spawn(&mut world);
    frame(&mut world, &mut schedule);
    assert_eq!(item_count(&mut world), 2);
}

#[test]
fn filling_the_board_reports_exhaustion_once_per_request() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(2, 1));
    let all_spawned = count_all_spawned(&mut world);

    press_spawn(&mut world);
    frames(&mut world, &mut schedule, 10);
    assert_eq!(item_count(&mut world), 1);
    assert_eq!(all_spawned.load(Ordering::SeqCst), 0);

    press_spawn(&mut world);
    frame(&mut world, &mut schedule);
    assert_eq!(item_count(&mut world), 1);
    assert_eq!(all_spawned.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_spawner_on_free_cell_moves_it_and_reorders_stack() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(3, 3));
    let moves = record_moves(&mut world);
    let spawner = spawner_entity(&mut world);
    let target = cell_position(&world, GridPos::new(2, 0));

    drag_spawner_to(&mut world, &mut schedule, target);

    let pos = world.get::<MapPosition>(spawner).unwrap().pos;
    assert_eq!((pos.x, pos.y), (target.x, target.y));
    assert_eq!(*moves.lock().unwrap(), vec![GridPos::new(2, 0)]);
    assert!(!world.get::<Spawner>(spawner).unwrap().is_dragging());
    assert!(!world.resource::<CameraRig>().is_moving());

    let grid = world.resource::<GridBoard>();
    let stack = grid.spawn_stack().unwrap();
    assert!(!stack.contains(&GridPos::new(2, 0)));
    assert_eq!(stack.last(), Some(&GridPos::new(1, 0)));
}

#[test]
fn dropping_spawner_on_blocked_cell_rolls_back() {
    let layout = GridLayoutData::from_json(
        r#"{ "grid": ["..#", "...", "..."], "spawner": [0, 2] }"#,
    )
    .unwrap();
    let (mut world, mut schedule) = make_world(&layout);
    let moves = record_moves(&mut world);
    let spawner = spawner_entity(&mut world);
    let start = world.get::<MapPosition>(spawner).unwrap().pos;
    let blocked = cell_position(&world, GridPos::new(2, 0));

    drag_spawner_to(&mut world, &mut schedule, blocked);

    let pos = world.get::<MapPosition>(spawner).unwrap().pos;
    assert_eq!((pos.x, pos.y), (start.x, start.y));
    assert!(moves.lock().unwrap().is_empty());
}

#[test]
fn dropping_spawner_on_occupied_cell_rolls_back() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(3, 3));
    press_spawn(&mut world);
    frames(&mut world, &mut schedule, 10);
    let occupied = {
        let mut q = world.query::<&Item>();
        q.single(&world).unwrap().cell
    };
    let moves = record_moves(&mut world);
    let spawner = spawner_entity(&mut world);
    let start = world.get::<MapPosition>(spawner).unwrap().pos;

    let target = cell_position(&world, occupied);
    drag_spawner_to(&mut world, &mut schedule, target);

    let pos = world.get::<MapPosition>(spawner).unwrap().pos;
    assert_eq!((pos.x, pos.y), (start.x, start.y));
    assert!(moves.lock().unwrap().is_empty());
}

// ==================== CONFIG / DEBUG ====================

#[test]
fn config_changes_reach_rig_and_spawner() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(4, 4));
    frame(&mut world, &mut schedule);
    {
        let mut config = world.resource_mut::<GameConfig>();
        config.max_pan_speed = 20.0;
        config.spawn_duration = 0.5;
    }
    frame(&mut world, &mut schedule);

    assert!(approx_eq(
        world.resource::<CameraRig>().tuning().max_pan_speed,
        20.0
    ));
    let spawner = spawner_entity(&mut world);
    assert!(approx_eq(
        world.get::<Spawner>(spawner).unwrap().spawn_duration(),
        0.5
    ));
}

#[test]
fn padding_change_refits_zoom_range() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(10, 6));
    frame(&mut world, &mut schedule);
    world.resource_mut::<GameConfig>().zoom_padding = 1.0;
    frames(&mut world, &mut schedule, 2);

    let rig = world.resource::<CameraRig>();
    // max(10 / 2, 6 / 2) * 1.0
    assert!(approx_eq(rig.max_zoom(), 5.0));
    assert!(approx_eq(rig.orthographic_size(), 5.0));
    assert!(approx_eq(world.resource::<ZoomSlider>().value(), 5.0));
}

#[test]
fn f11_toggles_debug_mode() {
    let (mut world, mut schedule) = make_world(&GridLayoutData::open(4, 4));
    world.resource_mut::<InputState>().mode_debug.just_pressed = true;
    frame(&mut world, &mut schedule);
    assert!(world.contains_resource::<DebugMode>());

    world.resource_mut::<InputState>().mode_debug.just_pressed = true;
    frame(&mut world, &mut schedule);
    assert!(!world.contains_resource::<DebugMode>());
}

#[test]
fn malformed_layout_is_rejected() {
    let mut layout = GridLayoutData::open(3, 3);
    layout.spawner = [7, 7];
    assert!(build_world(GameConfig::new(), &layout, square_screen()).is_err());
}
