//! Axis-aligned grab area used for pointer hit tests.
//!
//! The spawner answers "is the cursor over me" with this collider; it is a
//! plain AABB relative to the entity's [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, anchored at its min corner.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2 {
                x: width,
                y: height,
            },
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Collider of the given size centered on the entity position.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(width, height).with_offset(Vector2 {
            x: -width * 0.5,
            y: -height * 0.5,
        })
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let x0 = position.x + self.offset.x;
        let y0 = position.y + self.offset.y;
        let x1 = x0 + self.size.x;
        let y1 = y0 + self.size.y;
        (
            Vector2 {
                x: x0.min(x1),
                y: y0.min(y1),
            },
            Vector2 {
                x: x0.max(x1),
                y: y0.max(y1),
            },
        )
    }

    /// Point containment in world space. Edges count as inside.
    pub fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
