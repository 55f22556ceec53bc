//! Debug overlay toggle resource.
//!
//! While this resource exists the renderer draws the camera, zoom and spawner
//! diagnostics on top of the board. F11 flips it through
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the debug overlay is drawn.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
