//! Per-frame input resources.
//!
//! [`InputState`] holds the keyboard keys the rigs care about (panning, spawn,
//! debug toggle). [`PointerState`] holds the mouse/touch pointer: screen
//! position, frame delta, primary button edges and wheel. Both are written
//! once per frame by [`crate::systems::input::poll_input`] and read by the ECS
//! systems, which never touch the window backend directly.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Keyboard state relevant to the rigs.
///
/// WASD and the arrow keys both pan the camera; Space asks the spawner for an
/// item; F11 toggles the debug overlay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub pan_up: BoolState,
    pub pan_left: BoolState,
    pub pan_down: BoolState,
    pub pan_right: BoolState,
    pub arrow_up: BoolState,
    pub arrow_left: BoolState,
    pub arrow_down: BoolState,
    pub arrow_right: BoolState,
    pub action_spawn: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pan_up: BoolState::bound_to(KeyboardKey::KEY_W),
            pan_left: BoolState::bound_to(KeyboardKey::KEY_A),
            pan_down: BoolState::bound_to(KeyboardKey::KEY_S),
            pan_right: BoolState::bound_to(KeyboardKey::KEY_D),
            arrow_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            arrow_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            arrow_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            arrow_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            action_spawn: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Mutable access to every key state, for polling.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 10] {
        [
            &mut self.pan_up,
            &mut self.pan_left,
            &mut self.pan_down,
            &mut self.pan_right,
            &mut self.arrow_up,
            &mut self.arrow_left,
            &mut self.arrow_down,
            &mut self.arrow_right,
            &mut self.action_spawn,
            &mut self.mode_debug,
        ]
    }

    /// Held pan direction in world axes (Y up), components in {-1, 0, 1}.
    pub fn pan_direction(&self) -> Vector2 {
        let held = |a: &BoolState, b: &BoolState| a.active || b.active;
        let mut dir = Vector2 { x: 0.0, y: 0.0 };
        if held(&self.pan_left, &self.arrow_left) {
            dir.x -= 1.0;
        }
        if held(&self.pan_right, &self.arrow_right) {
            dir.x += 1.0;
        }
        if held(&self.pan_up, &self.arrow_up) {
            dir.y += 1.0;
        }
        if held(&self.pan_down, &self.arrow_down) {
            dir.y -= 1.0;
        }
        dir
    }
}

/// Edge-aware state of a pointer button.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Pointer (mouse or touch) state for the current frame, in screen pixels.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerState {
    pub screen: Vector2,
    /// Movement since the previous frame.
    pub delta: Vector2,
    pub primary: ButtonState,
    pub wheel: f32,
    /// Deltas come from a touch screen rather than a mouse.
    pub is_touch: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            screen: Vector2 { x: 0.0, y: 0.0 },
            delta: Vector2 { x: 0.0, y: 0.0 },
            primary: ButtonState::default(),
            wheel: 0.0,
            is_touch: false,
        }
    }
}
