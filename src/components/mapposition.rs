//! World-space position component.
//!
//! The world uses unit-sized grid cells with the Y axis pointing up, so a
//! `MapPosition` is directly comparable with the recorded world position of a
//! grid cell. Rendering converts to screen space through the camera's
//! [`OrthoView`](crate::resources::camerarig::OrthoView).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Pivot position of an entity in world units.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
