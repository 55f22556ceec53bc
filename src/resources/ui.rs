//! UI collaborators of the camera rig.
//!
//! - [`UiState`] answers whether the pointer is currently busy with the UI, so
//!   camera panning can be suppressed while the user works the zoom slider.
//! - [`ZoomSlider`] is the zoom widget: a clamped value between a min and max.
//!   Changes made to it reach the camera through ECS change detection (see
//!   [`crate::systems::camera::zoom_sync_system`]).

use bevy_ecs::prelude::Resource;

/// Query side of the UI layer used by the camera rig.
pub trait UiInteraction {
    fn is_ui_being_interacted(&self) -> bool;
}

/// Write side of a zoom widget.
pub trait ZoomControl {
    fn set_limits(&mut self, min: f32, max: f32);
    fn set_value(&mut self, value: f32);
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct UiState {
    /// Pointer is hovering a UI widget.
    pub pointer_over_ui: bool,
    /// A slider drag started on the widget and has not been released yet.
    pub dragging_slider: bool,
}

impl UiInteraction for UiState {
    fn is_ui_being_interacted(&self) -> bool {
        self.pointer_over_ui || self.dragging_slider
    }
}

/// Zoom slider model. `value` always lies in `[min, max]`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ZoomSlider {
    min: f32,
    max: f32,
    value: f32,
}

impl Default for ZoomSlider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 1.0,
        }
    }
}

impl ZoomSlider {
    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Position of the value inside the range, 0.0 at `min` and 1.0 at `max`.
    pub fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span > 0.0 {
            (self.value - self.min) / span
        } else {
            0.0
        }
    }
}

impl ZoomControl for ZoomSlider {
    fn set_limits(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
    }

    fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }
}
