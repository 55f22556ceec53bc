//! ECS resources made available to systems.
//!
//! Overview
//! - `camerarig` – orthographic camera state, panning and zoom limits
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – INI-backed settings
//! - `grid` – the board: cells, palette and spawn stack
//! - `gridlayout` – JSON board descriptions
//! - `input` – per-frame keyboard and pointer state
//! - `screensize` – current framebuffer dimensions in pixels
//! - `spawnerbridge` – channel carrying spawner callbacks into the ECS
//! - `ui` – zoom slider model and UI interaction flags
//! - `worldtime` – simulation time and delta
pub mod camerarig;
pub mod debugmode;
pub mod gameconfig;
pub mod grid;
pub mod gridlayout;
pub mod input;
pub mod screensize;
pub mod spawnerbridge;
pub mod ui;
pub mod worldtime;
