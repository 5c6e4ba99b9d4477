//! Simulation engine for SKYWARD.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for the frontend.

pub mod engine;
pub mod missions;
pub mod persistence;
pub mod progress;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skyward_core as core;

#[cfg(test)]
mod tests;
