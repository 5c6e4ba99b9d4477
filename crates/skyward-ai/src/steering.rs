//! Steering: obstacle avoidance, velocity shaping, and turn smoothing
//! for enemy aircraft.

use skyward_core::constants::*;
use skyward_core::enums::BehaviorState;
use skyward_core::types::{Orientation, Vec3};

/// A static obstacle (island) for avoidance.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub position: Vec3,
    pub size: f64,
}

/// Repulsion away from islands, nearby enemies, and the altitude band
/// edges. Summed into the movement direction before normalization.
pub fn avoidance(position: Vec3, islands: &[Obstacle], neighbors: &[Vec3]) -> Vec3 {
    let mut push = Vec3::ZERO;

    for island in islands {
        let range = island.size * AVOID_ISLAND_RANGE_FACTOR;
        let dist = position.distance_to(&island.position);
        if dist < range && dist > 1e-9 {
            let strength = (1.0 - dist / range) * AVOID_ISLAND_STRENGTH;
            let away = island.position.direction_to(&position);
            push = push.add(&away.scale(strength));
        }
    }

    for neighbor in neighbors {
        let dist = position.distance_to(neighbor);
        if dist < AVOID_ENEMY_RANGE && dist > 1e-9 {
            let strength = 1.0 - dist / AVOID_ENEMY_RANGE;
            let away = neighbor.direction_to(&position);
            push = push.add(&away.scale(strength));
        }
    }

    if position.y < STEER_FLOOR {
        push.y += (STEER_FLOOR - position.y) * STEER_ALTITUDE_PUSH;
    } else if position.y > STEER_CEILING {
        push.y -= (position.y - STEER_CEILING) * STEER_ALTITUDE_PUSH;
    }

    push
}

/// Behavior-specific speed multiplier.
pub fn speed_factor(behavior: BehaviorState) -> f64 {
    match behavior {
        BehaviorState::Pursuing => SPEED_FACTOR_PURSUE,
        BehaviorState::Retreating => SPEED_FACTOR_RETREAT,
        BehaviorState::Attacking => SPEED_FACTOR_ATTACK,
        _ => 1.0,
    }
}

/// Blend the current velocity toward the avoidance-adjusted heading at
/// the behavior-scaled speed. The airframe drag coefficient is the
/// blend weight toward the new velocity.
pub fn steer_velocity(
    current: Vec3,
    position: Vec3,
    target: Vec3,
    avoid: Vec3,
    behavior: BehaviorState,
    max_speed: f64,
    drag: f64,
) -> Vec3 {
    let direction = target.sub(&position).add(&avoid).normalized_or_zero();
    if direction == Vec3::ZERO {
        return current.scale(drag);
    }
    let desired = direction.scale(max_speed * speed_factor(behavior));
    desired.scale(drag).add(&current.scale(1.0 - drag))
}

/// Smooth the attitude toward the movement direction: exponential lerp
/// of yaw and pitch at `rotation_speed`, with a speed-gated bank into
/// the turn.
pub fn turn_toward(current: Orientation, velocity: Vec3, rotation_speed: f64) -> Orientation {
    let speed = velocity.length();
    if speed < 1e-6 {
        return current;
    }

    let direction = velocity.scale(1.0 / speed);
    let target_yaw = direction.x.atan2(direction.z);
    let target_pitch = -direction.y.asin();
    let target_roll = if speed > 0.1 { -direction.x * 0.5 } else { 0.0 };

    Orientation::new(
        current.pitch + (target_pitch - current.pitch) * rotation_speed,
        current.yaw + wrap_angle(target_yaw - current.yaw) * rotation_speed,
        current.roll + (target_roll - current.roll) * rotation_speed,
    )
}

/// Wrap an angle difference into (-π, π] so lerping takes the short way.
fn wrap_angle(mut angle: f64) -> f64 {
    while angle > std::f64::consts::PI {
        angle -= std::f64::consts::TAU;
    }
    while angle <= -std::f64::consts::PI {
        angle += std::f64::consts::TAU;
    }
    angle
}
