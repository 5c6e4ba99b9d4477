//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Continuous control axis inputs, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlAxes {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flight control ---
    /// Set the control surface inputs for subsequent ticks.
    SetControls { axes: ControlAxes },
    /// Set the throttle (clamped to [0, 1]).
    SetThrottle { throttle: f64 },
    /// Press or release the trigger.
    SetFiring { firing: bool },
    /// Switch the active weapon.
    SelectWeapon { index: usize },

    // --- Upgrades / loadout ---
    /// Switch the player airframe model.
    SetAircraftModel { model: AircraftModel },
    /// Set an upgrade level (engine or armor).
    SetEngineLevel { level: u32 },
    SetArmorLevel { level: u32 },

    // --- Simulation control ---
    /// Adjust world difficulty (clamped to [0.5, 2.0]).
    SetDifficulty { difficulty: f64 },
    /// Write a save snapshot to the configured save directory.
    SaveGame { slot: String },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
