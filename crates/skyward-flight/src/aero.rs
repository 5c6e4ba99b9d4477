//! Aerodynamic force model.
//!
//! Computes drag, lift, and weight for one aircraft per tick from its
//! velocity and attitude. Pure; the stall turbulence draws from an
//! injected RNG so the caller controls determinism.

use rand::Rng;

use skyward_core::constants::*;
use skyward_core::types::{Orientation, Vec3};

/// Tunable aerodynamic coefficients for one aircraft.
#[derive(Debug, Clone, Copy)]
pub struct AeroConfig {
    /// Fraction of velocity retained per step, in (0, 1].
    pub drag: f64,
    /// Lift factor.
    pub lift: f64,
    /// Weight force magnitude.
    pub weight: f64,
    /// Speed below which a stall can occur.
    pub stall_speed: f64,
    /// Pitch angle beyond which a stall can occur (radians).
    pub stall_angle: f64,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            drag: AERO_DRAG,
            lift: AERO_LIFT,
            weight: AERO_WEIGHT,
            stall_speed: AERO_STALL_SPEED,
            stall_angle: AERO_STALL_ANGLE,
        }
    }
}

/// Per-tick aerodynamic forces, individually and summed.
#[derive(Debug, Clone, Copy)]
pub struct AeroForces {
    pub drag: Vec3,
    pub lift: Vec3,
    pub weight: Vec3,
    pub total: Vec3,
    /// Whether the stall condition held this tick.
    pub is_stalled: bool,
    /// Angle between the forward vector and the horizontal plane (radians).
    pub pitch_angle: f64,
}

/// Compute the aerodynamic forces on an aircraft.
///
/// Stall requires BOTH low speed and high pitch; either alone keeps
/// normal lift. While stalled, lift collapses to a small upward push
/// plus bounded turbulence and the aircraft sinks under weight.
pub fn compute_forces(
    config: &AeroConfig,
    velocity: Vec3,
    attitude: Orientation,
    rng: &mut impl Rng,
) -> AeroForces {
    let speed = velocity.length();
    let forward = attitude.forward();
    let up = attitude.up();

    let pitch_angle = pitch_from_horizontal(forward);
    let is_stalled = speed < config.stall_speed && pitch_angle > config.stall_angle;

    // Drag opposes velocity proportionally.
    let drag = velocity.scale(-(1.0 - config.drag));

    let lift = if is_stalled {
        // Collapsed lift plus turbulence shake.
        let turbulence = Vec3::new(
            (rng.gen::<f64>() - 0.5) * 0.05,
            (rng.gen::<f64>() - 0.5) * 0.025,
            (rng.gen::<f64>() - 0.5) * 0.05,
        );
        up.scale(0.01).add(&turbulence)
    } else {
        // More speed and a near-optimal angle of attack give more lift.
        let speed_factor = (speed * speed * 3.0).min(1.0);
        let capped_pitch = pitch_angle.min(std::f64::consts::FRAC_PI_2);
        let angle_factor =
            (1.0 - (capped_pitch - AERO_OPTIMAL_ANGLE).abs() / std::f64::consts::FRAC_PI_2).max(0.0);
        up.scale(speed_factor * angle_factor * config.lift)
    };

    let weight = Vec3::new(0.0, -config.weight, 0.0);
    let total = drag.add(&lift).add(&weight);

    AeroForces {
        drag,
        lift,
        weight,
        total,
        is_stalled,
        pitch_angle,
    }
}

/// Angle between `forward` and its projection onto the horizontal
/// plane. A vertical forward vector reads as π/2.
fn pitch_from_horizontal(forward: Vec3) -> f64 {
    let horizontal = Vec3::new(forward.x, 0.0, forward.z).normalized_or_zero();
    if horizontal == Vec3::ZERO {
        return std::f64::consts::FRAC_PI_2;
    }
    horizontal.dot(&forward).clamp(-1.0, 1.0).acos()
}
