//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Orientation, Vec3};

/// World-space position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Linear velocity (units per tick).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Body attitude as pitch/yaw/roll.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Attitude(pub Orientation);

/// Angular velocity (rad/s) about the pitch/yaw/roll axes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AngularVelocity {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Hit points. `hp` stays clamped to [0, max].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max: f64,
}

/// Stable identifier for an enemy, safe to hold across frames.
/// Entity handles are never stored between ticks; cross-frame
/// references (formation leaders, mission targets) go through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Marks the player-controlled aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;

/// Per-tick player flight state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Throttle setting in [0, 1].
    pub throttle: f64,
    /// Remaining fuel in [0, 100]. At 0 the aircraft glides.
    pub fuel: f64,
    /// Whether the aircraft is currently stalled.
    pub is_stalling: bool,
    /// Recovery assist is active until this tick (0 = inactive).
    pub stall_assist_until_tick: u64,
    /// Whether the low-altitude warning is currently showing.
    pub low_altitude_warning: bool,
    /// Instantaneous g-force estimate, clamped to [0, MAX_G_FORCE].
    pub g_force: f64,
}

/// Airframe model and upgrade levels for the player aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airframe {
    pub model: AircraftModel,
    /// Engine upgrade level (1 = stock).
    pub engine_level: u32,
    /// Armor upgrade level (1 = stock).
    pub armor_level: u32,
}

/// A mounted weapon. Player loadouts carry several; enemies carry one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    /// Minimum seconds between shots.
    pub cooldown_secs: f64,
    /// Tick of the last shot (0 = never fired).
    pub last_fired_tick: u64,
    pub projectile_speed: f64,
    pub range: f64,
}

/// The player's weapon rack and current selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    pub weapons: Vec<Weapon>,
    pub selected: usize,
    /// Whether the trigger is currently held.
    pub firing: bool,
}

/// Enemy combat agent state driven by the behavior FSM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAgent {
    pub id: EnemyId,
    pub preset: EnemyPreset,
    pub faction: Faction,
    pub model: AircraftModel,
    pub behavior: BehaviorState,
    /// Awareness of the player in [0, 1].
    pub alert: f64,
    /// Patrol route waypoints (world space).
    pub patrol_route: Vec<Vec3>,
    pub patrol_index: usize,
    /// Jitter offset applied to the attack position.
    pub attack_offset: Vec3,
    /// Tick at which the attack offset is next refreshed.
    pub offset_refresh_tick: u64,
    /// Destination while retreating.
    pub retreat_target: Option<Vec3>,
    /// Formation leader, re-resolved by id every tick.
    pub formation_leader: Option<EnemyId>,
    /// Slot offset relative to the leader (leader-yaw rotated).
    pub formation_offset: Vec3,
}

/// Marks a destroyed enemy awaiting despawn. Wrecks are excluded
/// from the live count, targeting, and collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wreck;

/// Marks the player aircraft while it awaits respawn. Flight,
/// weapons, and collision skip a downed player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Downed;

/// In-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub kind: WeaponKind,
    pub damage: u32,
    /// Remaining flight time; removed at or below zero.
    pub lifetime_secs: f64,
    /// Position at the previous tick, for swept hit tests.
    pub prev_position: Vec3,
}

/// Expanding explosion effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub scale: f64,
    pub lifetime_secs: f64,
}

/// Collectible pickup with a trigger radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub radius: f64,
}

/// Floating island. Static obstacle and spawn/retreat anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Island {
    pub name: String,
    pub size: f64,
    pub zone: Zone,
    /// Faction controlling the island, if any.
    pub faction: Option<Faction>,
}

/// Training checkpoint trigger sphere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub radius: f64,
    pub triggered: bool,
}
