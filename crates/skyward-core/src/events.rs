//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::enums::*;
use crate::types::Vec3;

/// Audio cues for the frontend sound system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A weapon fired.
    WeaponFired { kind: WeaponKind },
    /// A projectile struck something.
    Hit,
    /// An explosion spawned.
    Explosion { scale: f64 },
    /// A pickup was collected.
    PickupCollected { kind: PickupKind },
    /// The player entered a stall.
    StallWarning,
    /// A checkpoint was triggered.
    CheckpointReached,
    /// Thunder, delayed after its lightning flash.
    Thunder,
    /// The player leveled up.
    LevelUp { level: u32 },
}

/// Discrete gameplay events for the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Transient notification text.
    Notification { message: String },
    /// An explosion effect at a world position.
    ExplosionSpawned { position: Vec3, scale: f64 },
    /// A lightning flash somewhere in the world.
    LightningFlash { position: Vec3 },
    /// An enemy was destroyed; rewards already granted.
    EnemyDestroyed {
        id: EnemyId,
        preset: EnemyPreset,
        experience: u32,
        credits: u32,
    },
    /// The player aircraft was destroyed.
    PlayerDestroyed { penalty: u32 },
    /// The player respawned.
    PlayerRespawned,
    /// The weather changed.
    WeatherChanged { weather: Weather },
    /// A mission changed status.
    MissionStatusChanged {
        mission_id: String,
        status: MissionStatus,
    },
    /// An objective within a mission completed.
    ObjectiveCompleted {
        mission_id: String,
        objective_id: String,
    },
}
