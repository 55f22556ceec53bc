//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. The camera rig reads
//! it to keep its aspect ratio in sync and to build screen/world conversions.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    /// Width over height; 1.0 for a degenerate (minimized) window.
    pub fn aspect(&self) -> f32 {
        if self.h > 0 && self.w > 0 {
            self.w as f32 / self.h as f32
        } else {
            1.0
        }
    }
}
