//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; entity state lives in
//! components, session state in the engine.

pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod environment;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod weapons;
