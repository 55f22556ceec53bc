use bevy_ecs::prelude::*;

/// The board was (re)built with new dimensions. The camera rig refits its
/// zoom range when it sees this.
#[derive(Event, Debug, Clone, Copy)]
pub struct GridResizedEvent {
    pub width: i32,
    pub height: i32,
}
