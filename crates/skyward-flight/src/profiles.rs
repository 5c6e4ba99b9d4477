//! Aircraft performance profiles.
//!
//! Consolidates per-airframe tuning for the flight model, plus the
//! multiplicative upgrade scaling used when equipping upgrades.

use skyward_core::enums::AircraftModel;

/// Performance profile for an airframe.
#[derive(Debug, Clone, Copy)]
pub struct AircraftProfile {
    pub mass: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub turn_rate: f64,
    /// Fraction of velocity retained per step.
    pub drag: f64,
    pub lift_factor: f64,
    /// Collision hitbox extents [width, height, length].
    pub hitbox: [f64; 3],
}

/// Get the performance profile for a given airframe.
pub fn get_profile(model: AircraftModel) -> AircraftProfile {
    match model {
        AircraftModel::Standard => AircraftProfile {
            mass: 1000.0,
            max_speed: 0.5,
            acceleration: 0.01,
            turn_rate: 0.03,
            drag: 0.99,
            lift_factor: 0.03,
            hitbox: [3.0, 1.0, 5.0],
        },
        AircraftModel::Fighter => AircraftProfile {
            mass: 800.0,
            max_speed: 0.7,
            acceleration: 0.015,
            turn_rate: 0.04,
            drag: 0.98,
            lift_factor: 0.025,
            hitbox: [2.5, 0.8, 4.5],
        },
        AircraftModel::Bomber => AircraftProfile {
            mass: 1500.0,
            max_speed: 0.4,
            acceleration: 0.008,
            turn_rate: 0.02,
            drag: 0.995,
            lift_factor: 0.04,
            hitbox: [4.0, 1.5, 6.0],
        },
        AircraftModel::Scout => AircraftProfile {
            mass: 600.0,
            max_speed: 0.6,
            acceleration: 0.012,
            turn_rate: 0.05,
            drag: 0.97,
            lift_factor: 0.02,
            hitbox: [2.5, 0.8, 4.0],
        },
        AircraftModel::Kraken => AircraftProfile {
            mass: 2500.0,
            max_speed: 0.35,
            acceleration: 0.005,
            turn_rate: 0.015,
            drag: 0.995,
            lift_factor: 0.05,
            hitbox: [6.0, 2.0, 8.0],
        },
    }
}

impl AircraftProfile {
    /// Profile with upgrade scaling applied. Levels are 1-based; level 1
    /// returns the base profile unchanged. Non-mutating.
    pub fn with_upgrades(&self, engine_level: u32, armor_level: u32) -> AircraftProfile {
        let e = engine_level.saturating_sub(1) as f64;
        let a = armor_level.saturating_sub(1) as f64;
        AircraftProfile {
            mass: self.mass * (1.0 + 0.10 * a),
            max_speed: self.max_speed * (1.0 + 0.10 * e),
            acceleration: self.acceleration * (1.0 + 0.125 * e),
            turn_rate: self.turn_rate * (1.0 + 0.05 * e),
            drag: self.drag,
            lift_factor: self.lift_factor * (1.0 + 0.0375 * e),
            hitbox: self.hitbox,
        }
    }

    /// Bounding sphere radius derived from the hitbox half-diagonal.
    pub fn collision_radius(&self) -> f64 {
        let [w, h, l] = self.hitbox;
        0.5 * (w * w + h * h + l * l).sqrt()
    }
}
