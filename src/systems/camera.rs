//! Camera rig systems and observers.
//!
//! - [`subscribe_camera_rig`] / [`unsubscribe_camera_rig`] attach and detach
//!   the rig from [`CameraMoveEvent`]s.
//! - [`camera_follow_system`] eases the camera towards its pan target.
//! - [`zoom_sync_system`] forwards zoom slider changes to the rig.
//! - [`camera_aspect_system`] keeps the rig's aspect ratio in sync with the
//!   screen.
//! - [`grid_resized_observer`] refits the zoom range to a rebuilt board.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::grid::GridResizedEvent;
use crate::events::input::CameraMoveEvent;
use crate::resources::camerarig::CameraRig;
use crate::resources::screensize::ScreenSize;
use crate::resources::ui::{UiState, ZoomSlider};
use crate::resources::worldtime::WorldTime;

/// Observer entity currently feeding move events into the rig.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraRigSubscription(pub Entity);

/// Apply a move event to the rig.
pub fn camera_move_observer(
    trigger: On<CameraMoveEvent>,
    mut rig: ResMut<CameraRig>,
    ui: Option<Res<UiState>>,
) {
    let event = trigger.event();
    let ui = ui.map(|ui| *ui).unwrap_or_default();
    if !rig.on_move_input(event.movement, event.is_touch_device, &ui) {
        debug!("Camera move ignored: UI is busy");
    }
}

/// Start feeding [`CameraMoveEvent`]s into the rig.
///
/// Subscribing twice keeps the existing observer.
pub fn subscribe_camera_rig(world: &mut World) -> Entity {
    if let Some(subscription) = world.get_resource::<CameraRigSubscription>() {
        return subscription.0;
    }
    let observer = world.spawn(Observer::new(camera_move_observer)).id();
    world.insert_resource(CameraRigSubscription(observer));
    world.flush();
    info!("Camera rig subscribed to move events");
    observer
}

/// Stop feeding move events into the rig. No-op when not subscribed.
pub fn unsubscribe_camera_rig(world: &mut World) {
    if let Some(subscription) = world.remove_resource::<CameraRigSubscription>() {
        world.despawn(subscription.0);
        info!("Camera rig unsubscribed from move events");
    }
}

/// Per-frame smoothing step.
pub fn camera_follow_system(mut rig: ResMut<CameraRig>, time: Res<WorldTime>) {
    // Skip the write so change detection stays quiet while idle
    if rig.is_moving() {
        rig.update(time.delta);
    }
}

/// Push slider changes into the camera zoom.
pub fn zoom_sync_system(slider: Res<ZoomSlider>, mut rig: ResMut<CameraRig>) {
    if slider.is_changed() && rig.orthographic_size() != slider.value() {
        rig.set_zoom(slider.value());
    }
}

pub fn camera_aspect_system(screen: Res<ScreenSize>, mut rig: ResMut<CameraRig>) {
    if screen.is_changed() && rig.aspect() != screen.aspect() {
        rig.set_aspect(screen.aspect());
        debug!("Camera aspect set to {:.3}", screen.aspect());
    }
}

/// Refit the zoom range to the new board and zoom fully out.
pub fn grid_resized_observer(
    trigger: On<GridResizedEvent>,
    mut rig: ResMut<CameraRig>,
    mut slider: ResMut<ZoomSlider>,
    screen: Option<Res<ScreenSize>>,
) {
    let event = trigger.event();
    if let Some(screen) = screen {
        rig.set_aspect(screen.aspect());
    }
    rig.recompute_zoom_limits(event.width as f32, event.height as f32, &mut *slider);
}
