//! Input-derived events.
//!
//! Hardware input is polled into [`InputState`](crate::resources::input::InputState)
//! and [`PointerState`](crate::resources::input::PointerState); the systems
//! that read those resources turn gameplay-relevant actions into the events
//! below so the rigs never look at the raw input.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

/// A pan request for the camera rig.
///
/// `movement` is in world axes (Y up). Mouse drags and the keyboard arrive
/// already scaled; touch deltas arrive in raw pixels and are damped by the rig.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraMoveEvent {
    pub movement: Vector2,
    pub is_touch_device: bool,
}

/// Ask every spawner for its next item.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnRequestEvent {}
