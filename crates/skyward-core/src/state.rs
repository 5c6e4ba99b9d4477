//! World snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{Orientation, SimTime, Vec3};

/// Complete world state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub pickups: Vec<PickupView>,
    pub environment: EnvironmentView,
    pub missions: Vec<MissionView>,
    pub progress: ProgressView,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
}

/// Player aircraft state for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub rotation: Orientation,
    pub velocity: Vec3,
    pub speed: f64,
    pub model: AircraftModel,
    pub health: f64,
    pub max_health: f64,
    pub fuel: f64,
    pub throttle: f64,
    pub g_force: f64,
    pub is_stalling: bool,
    pub low_altitude_warning: bool,
    pub weapons: Vec<WeaponView>,
    pub selected_weapon: usize,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Orientation::default(),
            velocity: Vec3::ZERO,
            speed: 0.0,
            model: AircraftModel::Standard,
            health: 100.0,
            max_health: 100.0,
            fuel: 100.0,
            throttle: 0.0,
            g_force: 1.0,
            is_stalling: false,
            low_altitude_warning: false,
            weapons: Vec::new(),
            selected_weapon: 0,
        }
    }
}

/// One mounted weapon for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub ammo: u32,
    pub max_ammo: u32,
    /// Seconds until the weapon can fire again (0 = ready).
    pub cooldown_remaining: f64,
}

/// A live enemy for display. Wrecks are listed with `alive = false`
/// until their despawn grace expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub preset: EnemyPreset,
    pub faction: Faction,
    pub model: AircraftModel,
    pub position: Vec3,
    pub rotation: Orientation,
    pub velocity: Vec3,
    pub health: f64,
    pub max_health: f64,
    pub behavior: BehaviorState,
    pub alive: bool,
}

/// An in-flight projectile for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub kind: WeaponKind,
    pub from_player: bool,
}

/// An active explosion effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Vec3,
    pub scale: f64,
    /// Remaining fraction of the effect's lifetime in [0, 1].
    pub progress: f64,
}

/// A collectible pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub position: Vec3,
}

/// Environment state for lighting and sky rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentView {
    /// Day-night cycle position in [0, 1). 0.5 = noon.
    pub day_cycle: f64,
    pub weather: Weather,
}

/// Mission progress for the journal UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionView {
    pub id: String,
    pub title: String,
    pub status: MissionStatus,
    pub objectives: Vec<ObjectiveView>,
}

/// One objective line within a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub id: String,
    pub description: String,
    pub completed: bool,
    /// Progress counter for defeat-count objectives ("2/3").
    pub progress: Option<(u32, u32)>,
}

/// Player progression for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressView {
    pub credits: u32,
    pub experience: u32,
    pub level: u32,
    pub rank: String,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            credits: 0,
            experience: 0,
            level: 1,
            rank: crate::constants::LEVEL_RANKS[0].to_string(),
        }
    }
}
