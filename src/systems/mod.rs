//! Frame systems.
//!
//! Submodules overview
//! - [`camera`] – move-event subscription, camera smoothing, zoom and aspect sync
//! - [`gameconfig`] – push [`crate::resources::gameconfig::GameConfig`] changes into the rigs
//! - [`input`] – hardware polling, key actions and pan input
//! - [`render`] – draw the board, items, spawner, slider and debug overlay
//! - [`spawner`] – spawner drag, spawning, spawn moves and callback forwarding
//! - [`time`] – update simulation time and delta
//! - [`ui`] – zoom slider widget

pub mod camera;
pub mod gameconfig;
pub mod input;
pub mod render;
pub mod spawner;
pub mod time;
pub mod ui;
