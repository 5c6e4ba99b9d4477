//! Preset-specific behavioral profiles.
//!
//! Consolidates per-preset parameters for the behavior FSM, steering,
//! and the spawner's reward bookkeeping.

use skyward_core::enums::{AircraftModel, EnemyPreset, Faction, PatrolPattern, WeaponKind};

/// Weapon parameters carried by an enemy preset.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    pub damage: u32,
    /// Minimum seconds between shots.
    pub cooldown_secs: f64,
    pub range: f64,
    pub projectile_speed: f64,
}

/// Patrol route parameters.
#[derive(Debug, Clone, Copy)]
pub struct PatrolSpec {
    pub pattern: PatrolPattern,
    pub radius: f64,
}

/// Full behavioral profile for an enemy preset.
#[derive(Debug, Clone, Copy)]
pub struct EnemyProfile {
    pub model: AircraftModel,
    pub faction: Faction,
    pub max_health: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    /// Exponential turn-smoothing rate.
    pub rotation_speed: f64,
    pub weapon: WeaponSpec,
    pub patrol: PatrolSpec,
    /// Range within which the player raises this enemy's alert.
    pub detection_range: f64,
    /// Range at which pursuit becomes an attack.
    pub attack_range: f64,
    /// Range beyond which pursuit is abandoned.
    pub give_up_range: f64,
    /// Experience awarded to the player on kill.
    pub experience: u32,
    /// Credits awarded to the player on kill.
    pub credits: u32,
}

/// Get the behavioral profile for a given preset.
pub fn get_profile(preset: EnemyPreset) -> EnemyProfile {
    match preset {
        EnemyPreset::PirateFighter => EnemyProfile {
            model: AircraftModel::Fighter,
            faction: Faction::Pirates,
            max_health: 80.0,
            max_speed: 0.4,
            acceleration: 0.015,
            rotation_speed: 0.06,
            weapon: WeaponSpec {
                kind: WeaponKind::Machinegun,
                damage: 8,
                cooldown_secs: 0.8,
                range: 60.0,
                projectile_speed: 4.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::Circle,
                radius: 50.0,
            },
            detection_range: 120.0,
            attack_range: 50.0,
            give_up_range: 200.0,
            experience: 50,
            credits: 100,
        },
        EnemyPreset::PirateBomber => EnemyProfile {
            model: AircraftModel::Bomber,
            faction: Faction::Pirates,
            max_health: 120.0,
            max_speed: 0.25,
            acceleration: 0.008,
            rotation_speed: 0.04,
            weapon: WeaponSpec {
                kind: WeaponKind::Rocket,
                damage: 20,
                cooldown_secs: 2.0,
                range: 80.0,
                projectile_speed: 3.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::Linear,
                radius: 80.0,
            },
            detection_range: 100.0,
            attack_range: 70.0,
            give_up_range: 150.0,
            experience: 80,
            credits: 150,
        },
        EnemyPreset::MilitaryPatrol => EnemyProfile {
            model: AircraftModel::Standard,
            faction: Faction::Military,
            max_health: 100.0,
            max_speed: 0.35,
            acceleration: 0.01,
            rotation_speed: 0.05,
            weapon: WeaponSpec {
                kind: WeaponKind::Machinegun,
                damage: 10,
                cooldown_secs: 1.0,
                range: 70.0,
                projectile_speed: 4.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::Circle,
                radius: 80.0,
            },
            detection_range: 150.0,
            attack_range: 60.0,
            give_up_range: 200.0,
            experience: 60,
            credits: 120,
        },
        EnemyPreset::MilitaryElite => EnemyProfile {
            model: AircraftModel::Fighter,
            faction: Faction::Military,
            max_health: 150.0,
            max_speed: 0.45,
            acceleration: 0.02,
            rotation_speed: 0.07,
            weapon: WeaponSpec {
                kind: WeaponKind::Missile,
                damage: 25,
                cooldown_secs: 3.0,
                range: 100.0,
                projectile_speed: 5.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::FigureEight,
                radius: 100.0,
            },
            detection_range: 200.0,
            attack_range: 80.0,
            give_up_range: 250.0,
            experience: 100,
            credits: 200,
        },
        EnemyPreset::MercenaryScout => EnemyProfile {
            model: AircraftModel::Scout,
            faction: Faction::Mercenary,
            max_health: 70.0,
            max_speed: 0.5,
            acceleration: 0.02,
            rotation_speed: 0.08,
            weapon: WeaponSpec {
                kind: WeaponKind::Machinegun,
                damage: 6,
                cooldown_secs: 0.5,
                range: 50.0,
                projectile_speed: 5.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::Random,
                radius: 150.0,
            },
            detection_range: 180.0,
            attack_range: 40.0,
            give_up_range: 300.0,
            experience: 40,
            credits: 80,
        },
        EnemyPreset::SkyKraken => EnemyProfile {
            model: AircraftModel::Kraken,
            faction: Faction::Wildlife,
            max_health: 500.0,
            max_speed: 0.3,
            acceleration: 0.008,
            rotation_speed: 0.03,
            weapon: WeaponSpec {
                kind: WeaponKind::Lightning,
                damage: 30,
                cooldown_secs: 2.0,
                range: 60.0,
                projectile_speed: 8.0,
            },
            patrol: PatrolSpec {
                pattern: PatrolPattern::Circle,
                radius: 60.0,
            },
            detection_range: 150.0,
            attack_range: 60.0,
            give_up_range: 200.0,
            experience: 300,
            credits: 500,
        },
    }
}
