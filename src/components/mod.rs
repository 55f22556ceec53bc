//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangle used to grab the spawner
//! - [`item`] – grid item data and the [`item::ItemFactory`] creation seam
//! - [`mapposition`] – world-space position of an entity
//! - [`spawner`] – item spawner with its drag state machine and spawn job
//! - [`tween`] – explicit-tick position tween for the spawn move

pub mod boxcollider;
pub mod item;
pub mod mapposition;
pub mod spawner;
pub mod tween;
