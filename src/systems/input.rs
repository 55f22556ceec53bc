//! Input systems.
//!
//! - [`poll_input`] reads hardware input from Raylib each frame and writes it
//!   into [`InputState`], [`PointerState`] and [`ScreenSize`]. It runs outside
//!   the schedule, next to the time update.
//! - [`key_actions_system`] turns key presses into spawn requests and debug
//!   toggles.
//! - [`pointer_pan_system`] and [`keyboard_pan_system`] emit
//!   [`CameraMoveEvent`]s for the camera rig.
use bevy_ecs::prelude::*;
use raylib::prelude::{MouseButton, RaylibHandle, Vector2};

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::spawner::Spawner;
use crate::events::input::{CameraMoveEvent, SpawnRequestEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::camerarig::CameraRig;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{ButtonState, InputState, PointerState};
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;

/// Scale applied to mouse drag deltas (pixels) before they reach the rig.
pub const MOUSE_PAN_SCALE: f32 = 0.1;

/// Poll Raylib for keyboard and pointer input.
pub fn poll_input(world: &mut World, rl: &RaylibHandle) {
    {
        let mut input = world.resource_mut::<InputState>();
        for key in input.keys_mut() {
            key.active = rl.is_key_down(key.key_binding);
            key.just_pressed = rl.is_key_pressed(key.key_binding);
            key.just_released = rl.is_key_released(key.key_binding);
        }
    }

    let is_touch = world
        .get_resource::<GameConfig>()
        .map(|config| config.touch_device)
        .unwrap_or(false);
    let left = MouseButton::MOUSE_BUTTON_LEFT;
    *world.resource_mut::<PointerState>() = PointerState {
        screen: rl.get_mouse_position(),
        delta: rl.get_mouse_delta(),
        primary: ButtonState {
            down: rl.is_mouse_button_down(left),
            pressed: rl.is_mouse_button_pressed(left),
            released: rl.is_mouse_button_released(left),
        },
        wheel: rl.get_mouse_wheel_move(),
        is_touch,
    };

    let size = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    let mut screen = world.resource_mut::<ScreenSize>();
    if *screen != size {
        *screen = size;
    }
}

/// Emit events for the action keys that were just pressed.
pub fn key_actions_system(input: Res<InputState>, mut commands: Commands) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.action_spawn.just_pressed {
        commands.trigger(SpawnRequestEvent {});
    }
}

/// Pointer drag delta in world axes, ready for the rig.
///
/// Mouse deltas are pre-scaled; touch deltas stay in pixels because the rig
/// damps them itself.
pub fn pointer_pan_movement(pointer: &PointerState) -> Vector2 {
    let scale = if pointer.is_touch { 1.0 } else { MOUSE_PAN_SCALE };
    Vector2 {
        x: pointer.delta.x * scale,
        y: -pointer.delta.y * scale,
    }
}

/// Drag the view with the primary pointer button.
///
/// Does nothing on the press frame and while a spawner is under the pointer
/// or being dragged. UI gating happens inside the rig.
pub fn pointer_pan_system(
    pointer: Res<PointerState>,
    rig: Res<CameraRig>,
    screen: Res<ScreenSize>,
    spawners: Query<(&Spawner, &MapPosition, &BoxCollider)>,
    mut commands: Commands,
) {
    if !pointer.primary.down || pointer.primary.pressed {
        return;
    }
    if pointer.delta.x == 0.0 && pointer.delta.y == 0.0 {
        return;
    }
    let cursor_world = rig.view(*screen).screen_to_world(pointer.screen);
    let grabbed = spawners.iter().any(|(spawner, position, collider)| {
        spawner.is_mouse_over_or_dragging(position.pos, collider, cursor_world)
    });
    if grabbed {
        return;
    }
    commands.trigger(CameraMoveEvent {
        movement: pointer_pan_movement(&pointer),
        is_touch_device: pointer.is_touch,
    });
}

/// Pan with WASD / arrow keys at the zoom-dependent speed.
pub fn keyboard_pan_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let dir = input.pan_direction();
    if dir.x == 0.0 && dir.y == 0.0 {
        return;
    }
    // The rig moves the view against the input, so invert to pan along it
    commands.trigger(CameraMoveEvent {
        movement: Vector2 {
            x: -dir.x * time.delta,
            y: -dir.y * time.delta,
        },
        is_touch_device: false,
    });
}
