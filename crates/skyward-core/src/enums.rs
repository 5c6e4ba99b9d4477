//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Aircraft airframe model. Determines the base performance profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftModel {
    /// Balanced all-rounder.
    #[default]
    Standard,
    /// Fast and agile, light airframe.
    Fighter,
    /// Heavy, slow, high lift.
    Bomber,
    /// Very agile, fragile.
    Scout,
    /// Boss airframe: massive, sluggish.
    Kraken,
}

/// Weapon classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Rapid fire, low damage per round.
    #[default]
    Machinegun,
    /// Slow, heavy warhead.
    Rocket,
    /// Long range guided warhead.
    Missile,
    /// Boss arc weapon.
    Lightning,
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Dormant until the player comes within detection range.
    #[default]
    Idle,
    /// Following a patrol route.
    Patrolling,
    /// Closing on the player, not yet in attack range.
    Pursuing,
    /// In attack range, jinking and firing.
    Attacking,
    /// Fleeing toward a friendly island to recover.
    Retreating,
    /// Holding a slot relative to a formation leader.
    Formation,
}

/// Patrol path shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolPattern {
    #[default]
    Circle,
    FigureEight,
    Linear,
    Random,
}

/// Faction affiliation for enemies and islands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Neutral,
    Pirates,
    Military,
    Mercenary,
    Wildlife,
}

/// Enemy preset identifier. Each preset bundles an airframe, weapon,
/// behavior profile, and reward values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyPreset {
    PirateFighter,
    PirateBomber,
    MilitaryPatrol,
    MilitaryElite,
    MercenaryScout,
    SkyKraken,
}

/// World zone. Gates which enemy presets may spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    StartingIslands,
    VolcanicZone,
    CrystalZone,
    AncientZone,
}

/// Weather state for the world orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Stormy,
    Foggy,
}

/// Pickup classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Fuel,
    Ammo,
    Credits,
    Experience,
}

/// Mission lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    /// Dependencies not yet completed.
    #[default]
    Locked,
    /// Available and being tracked.
    Active,
    Completed,
}

/// Who fired a projectile. Controls which targets it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    /// Enemy projectile, tagged with the shooter's stable id.
    Enemy(u32),
}

/// Slot within a spawned formation. Offsets are relative to the leader,
/// rotated by the leader's yaw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationSlot {
    Lead,
    Right,
    Left,
    RightRear,
    LeftRear,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    GameOver,
}
