//! gridrig library.
//!
//! Camera and spawner rigs for a grid board, built on `bevy_ecs`. This module
//! exposes the components, resources, systems and events for use in
//! integration tests and by the binary.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
