//! Event types and observers.
//!
//! Events decouple the input layer from the two rigs and carry the spawner's
//! completion callbacks back into the ECS.
//!
//! Submodules:
//! - [`grid`] – board rebuilt with new dimensions
//! - [`input`] – camera pan and spawn requests derived from input
//! - [`spawner`] – spawner moved / spawn stack exhausted
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod grid;
pub mod input;
pub mod spawner;
pub mod switchdebug;
