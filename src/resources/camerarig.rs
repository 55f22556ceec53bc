//! Orthographic camera rig.
//!
//! [`CameraRig`] owns the camera position, the pan target and the zoom
//! (orthographic extent, i.e. half of the visible world height). Move input
//! accumulates into the target; a per-frame [`CameraRig::update`] eases the
//! position towards it and snaps once close enough.
//!
//! Panning speed depends on zoom: close in (extent near
//! [`MIN_ZOOM_THRESHOLD`]) it uses `min_pan_speed`, fully zoomed out it uses
//! `max_pan_speed`.
//!
//! The zoom upper bound is derived from the grid size by
//! [`CameraRig::recompute_zoom_limits`], which also zooms fully out and pushes
//! the new range to the zoom widget.
//!
//! Screen/world conversion goes through [`OrthoView`], a copyable snapshot of
//! the camera. World Y points up; screen Y points down.

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use raylib::prelude::{Camera2D, Vector2, Vector3};

use crate::resources::screensize::ScreenSize;
use crate::resources::ui::{UiInteraction, ZoomControl};

/// Lower zoom bound (orthographic extent) in world units.
pub const MIN_ZOOM_THRESHOLD: f32 = 3.5;
/// Scale applied to deltas coming from touch input.
pub const TOUCH_DAMPING: f32 = 0.1;
/// Squared distance under which the camera snaps onto its target.
pub const SNAP_DISTANCE_SQ: f32 = 0.001;

pub const DEFAULT_MIN_PAN_SPEED: f32 = 2.5;
pub const DEFAULT_MAX_PAN_SPEED: f32 = 8.0;
pub const DEFAULT_SMOOTH_FACTOR: f32 = 0.1;
pub const DEFAULT_ZOOM_PADDING: f32 = 1.1;
const INITIAL_MAX_ZOOM: f32 = 20.0;

/// How the smoothing factor is applied each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Fixed factor per update call. Convergence speed depends on frame rate.
    PerFrame,
    /// Factor rescaled by elapsed time so that it matches `PerFrame` at
    /// `reference_fps`.
    TimeScaled { reference_fps: f32 },
}

impl Smoothing {
    fn factor(self, smooth_factor: f32, dt: f32) -> f32 {
        match self {
            Smoothing::PerFrame => smooth_factor,
            Smoothing::TimeScaled { reference_fps } => {
                let keep = (1.0 - smooth_factor).clamp(0.0, 1.0);
                1.0 - keep.powf(dt.max(0.0) * reference_fps)
            }
        }
    }
}

/// Tunable parameters of the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub min_pan_speed: f32,
    pub max_pan_speed: f32,
    pub smooth_factor: f32,
    /// Multiplier applied to the fitted zoom when deriving the upper bound.
    pub padding: f32,
    pub smoothing: Smoothing,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            min_pan_speed: DEFAULT_MIN_PAN_SPEED,
            max_pan_speed: DEFAULT_MAX_PAN_SPEED,
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
            padding: DEFAULT_ZOOM_PADDING,
            smoothing: Smoothing::PerFrame,
        }
    }
}

/// Camera snapshot used to convert between screen pixels and world units.
#[derive(Debug, Clone, Copy)]
pub struct OrthoView {
    pub center: Vector2,
    /// Orthographic extent (half of the visible world height).
    pub half_height: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl OrthoView {
    pub fn pixels_per_unit(&self) -> f32 {
        if self.half_height > 0.0 && self.screen_height > 0.0 {
            self.screen_height / (2.0 * self.half_height)
        } else {
            1.0
        }
    }

    /// raylib camera for drawing in world space.
    ///
    /// raylib's y axis points down, so world points are drawn at `(x, -y)`.
    pub fn camera2d(&self) -> Camera2D {
        Camera2D {
            offset: Vector2 {
                x: self.screen_width * 0.5,
                y: self.screen_height * 0.5,
            },
            target: Vector2 {
                x: self.center.x,
                y: -self.center.y,
            },
            rotation: 0.0,
            zoom: self.pixels_per_unit(),
        }
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        let ppu = self.pixels_per_unit();
        Vector2 {
            x: self.center.x + (screen.x - self.screen_width * 0.5) / ppu,
            y: self.center.y - (screen.y - self.screen_height * 0.5) / ppu,
        }
    }

    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        let ppu = self.pixels_per_unit();
        Vector2 {
            x: (world.x - self.center.x) * ppu + self.screen_width * 0.5,
            y: (self.center.y - world.y) * ppu + self.screen_height * 0.5,
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Position of `value` between `a` and `b`, clamped to [0, 1]. A degenerate
/// range yields 0.
fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a != b {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn lerp_v3(a: Vector3, b: Vector3, t: f32) -> Vector3 {
    Vector3 {
        x: lerp(a.x, b.x, t),
        y: lerp(a.y, b.y, t),
        z: lerp(a.z, b.z, t),
    }
}

fn distance_sq(a: Vector3, b: Vector3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    position: Vector3,
    target: Vector3,
    depth: f32,
    orthographic_size: f32,
    aspect: f32,
    max_zoom: f32,
    tuning: CameraTuning,
    should_move: bool,
}

impl CameraRig {
    /// Rig at `position`. The depth (`position.z`) is fixed from here on.
    pub fn new(position: Vector3, orthographic_size: f32, aspect: f32) -> Self {
        Self {
            position,
            target: position,
            depth: position.z,
            orthographic_size,
            aspect,
            max_zoom: INITIAL_MAX_ZOOM,
            tuning: CameraTuning::default(),
            should_move: false,
        }
    }

    pub fn with_tuning(mut self, tuning: CameraTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn set_tuning(&mut self, tuning: CameraTuning) {
        self.tuning = tuning;
    }

    pub fn tuning(&self) -> CameraTuning {
        self.tuning
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn min_zoom(&self) -> f32 {
        MIN_ZOOM_THRESHOLD
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Whether a pan is still converging.
    pub fn is_moving(&self) -> bool {
        self.should_move
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Current pan speed in world units per unit of input.
    pub fn pan_speed(&self) -> f32 {
        let t = inverse_lerp(MIN_ZOOM_THRESHOLD, self.max_zoom, self.orthographic_size);
        lerp(self.tuning.min_pan_speed, self.tuning.max_pan_speed, t)
    }

    /// Accumulate a move input into the pan target.
    ///
    /// The view moves opposite to the input so that dragging drags the world.
    /// Returns `false` when the input was dropped because the UI is busy.
    pub fn on_move_input(
        &mut self,
        movement: Vector2,
        is_touch_device: bool,
        ui: &impl UiInteraction,
    ) -> bool {
        if ui.is_ui_being_interacted() {
            return false;
        }

        let scale = if is_touch_device { TOUCH_DAMPING } else { 1.0 };
        let speed = self.pan_speed();

        self.target.x -= movement.x * scale * speed;
        self.target.y -= movement.y * scale * speed;
        self.target.z = self.depth;
        self.should_move = true;
        true
    }

    /// Ease the position towards the target. No-op while idle.
    pub fn update(&mut self, dt: f32) {
        if !self.should_move {
            return;
        }

        let factor = self
            .tuning
            .smoothing
            .factor(self.tuning.smooth_factor, dt);
        self.position = lerp_v3(self.position, self.target, factor);

        if distance_sq(self.position, self.target) < SNAP_DISTANCE_SQ {
            self.position = self.target;
            self.should_move = false;
        }
    }

    /// Fit the zoom range to a grid and zoom fully out.
    pub fn recompute_zoom_limits(
        &mut self,
        grid_width: f32,
        grid_height: f32,
        zoom: &mut impl ZoomControl,
    ) {
        let for_width = grid_width / (2.0 * self.aspect);
        let for_height = grid_height / 2.0;

        let fitted = for_width.max(for_height) * self.tuning.padding;
        if fitted < MIN_ZOOM_THRESHOLD {
            warn!(
                "Grid {}x{} fits in zoom {:.2}, below the minimum {}; clamping",
                grid_width, grid_height, fitted, MIN_ZOOM_THRESHOLD
            );
        }
        self.max_zoom = fitted.max(MIN_ZOOM_THRESHOLD);

        zoom.set_limits(MIN_ZOOM_THRESHOLD, self.max_zoom);
        zoom.set_value(self.max_zoom);
        self.set_zoom(self.max_zoom);
        debug!(
            "Zoom limits for {}x{} grid: [{}, {:.3}]",
            grid_width, grid_height, MIN_ZOOM_THRESHOLD, self.max_zoom
        );
    }

    /// Set the orthographic extent directly.
    pub fn set_zoom(&mut self, value: f32) {
        self.orthographic_size = value;
    }

    /// Read-only view for screen/world conversion on a screen of the given size.
    pub fn view(&self, screen: ScreenSize) -> OrthoView {
        OrthoView {
            center: Vector2 {
                x: self.position.x,
                y: self.position.y,
            },
            half_height: self.orthographic_size,
            screen_width: screen.w as f32,
            screen_height: screen.h as f32,
        }
    }
}
