//! Player flight controller.
//!
//! Applies throttle thrust, aerodynamic forces, control torques, fuel
//! burn, stall handling, and the low-altitude warning. Runs on the
//! single player entity; a downed player is skipped entirely.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::commands::ControlAxes;
use skyward_core::components::{
    Airframe, AngularVelocity, Attitude, Downed, PlayerState, PlayerTag, Position, Velocity,
};
use skyward_core::constants::*;
use skyward_core::enums::AircraftModel;
use skyward_core::events::{AudioEvent, GameEvent};

use skyward_flight::aero::{self, AeroConfig};
use skyward_flight::profiles::get_profile;

/// Run one flight step for the player.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    controls: &ControlAxes,
    current_tick: u64,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    let mut query = world
        .query::<(
            &PlayerTag,
            &Position,
            &mut Velocity,
            &mut Attitude,
            &mut AngularVelocity,
            &mut PlayerState,
            &Airframe,
        )>()
        .without::<&Downed>();
    let Some((_entity, (_, pos, vel, attitude, ang_vel, state, airframe))) =
        query.iter().next()
    else {
        return;
    };

    let base = get_profile(airframe.model);
    let profile = base.with_upgrades(airframe.engine_level, airframe.armor_level);

    // Fuel burn scales with throttle; better engines burn leaner.
    let burn = FUEL_BURN_RATE * state.throttle * (2.0 - 0.2 * airframe.engine_level as f64);
    state.fuel = (state.fuel - burn).max(0.0);
    let gliding = state.fuel <= 0.0;

    if gliding && rng.gen::<f64>() < FUEL_WARNING_CHANCE {
        events.push(GameEvent::Notification {
            message: "OUT OF FUEL!".to_string(),
        });
    }

    let config = if gliding {
        AeroConfig {
            drag: (1.0 - (1.0 - profile.drag) * 1.05).clamp(0.0, 1.0),
            lift: profile.lift_factor * 0.5,
            weight: 0.01,
            stall_speed: AERO_STALL_SPEED * 0.5,
            stall_angle: AERO_STALL_ANGLE,
        }
    } else {
        AeroConfig {
            drag: profile.drag,
            lift: profile.lift_factor,
            weight: 0.0098,
            stall_speed: AERO_STALL_SPEED,
            stall_angle: AERO_STALL_ANGLE,
        }
    };

    let previous_velocity = vel.0;

    if !gliding {
        let engine_factor = 1.0 + 0.2 * airframe.engine_level.saturating_sub(1) as f64;
        let thrust = state.throttle * base.acceleration * engine_factor;
        let forward = attitude.0.forward();
        vel.0 = vel.0.add(&forward.scale(thrust));
    }

    let forces = aero::compute_forces(&config, vel.0, attitude.0, rng);
    vel.0 = vel.0.add(&forces.total);

    // Soft speed limit: excess over the airframe maximum bleeds off as
    // extra drag rather than a hard cap.
    let mut speed = vel.0.length();
    if speed > profile.max_speed {
        let excess = speed - profile.max_speed;
        vel.0 = vel.0.scale(1.0 - excess / speed * OVERSPEED_BLEED);
        speed = vel.0.length();
    }

    // G-force from the per-second velocity change.
    let delta = vel.0.sub(&previous_velocity).length() / DT;
    state.g_force = (1.0 + delta / 9.8).clamp(0.0, MAX_G_FORCE);

    // Stall edge: start the recovery-assist window and warn once.
    if forces.is_stalled && !state.is_stalling {
        state.stall_assist_until_tick =
            current_tick + (STALL_ASSIST_SECS * TICK_RATE as f64) as u64;
        events.push(GameEvent::Notification {
            message: "STALL WARNING!".to_string(),
        });
        audio_events.push(AudioEvent::StallWarning);
    }
    state.is_stalling = forces.is_stalled;

    apply_controls(
        controls,
        state,
        attitude,
        ang_vel,
        airframe.model,
        profile.turn_rate,
        speed,
        gliding,
        current_tick,
    );

    // Low-altitude warning, edge-triggered.
    let low = pos.0.y < MIN_HEIGHT + LOW_ALTITUDE_MARGIN;
    if low && !state.low_altitude_warning {
        events.push(GameEvent::Notification {
            message: "LOW ALTITUDE!".to_string(),
        });
    }
    state.low_altitude_warning = low;
}

/// Map control inputs to angular velocity, with per-model axis
/// authority, speed-gated effectiveness, stall assist, and passive
/// pitch/roll stabilization.
#[allow(clippy::too_many_arguments)]
fn apply_controls(
    controls: &ControlAxes,
    state: &PlayerState,
    attitude: &Attitude,
    ang_vel: &mut AngularVelocity,
    model: AircraftModel,
    turn_rate: f64,
    speed: f64,
    gliding: bool,
    current_tick: u64,
) {
    let mut pitch_input = controls.pitch;
    let mut roll_input = controls.roll;
    let yaw_input = controls.yaw;

    // Recovery assist noses down and damps roll for the whole window,
    // even after the stall itself has cleared.
    if current_tick < state.stall_assist_until_tick {
        pitch_input = pitch_input.max(0.02);
        roll_input *= 0.5;
    }

    let mut effectiveness = 0.3 + (speed * 2.0).min(1.0) * 0.7;
    if state.is_stalling {
        effectiveness *= 0.3;
    }
    // Dead engine, sluggish control surfaces.
    if gliding {
        effectiveness *= 0.7;
    }

    let (pitch_authority, yaw_authority, roll_authority) = match model {
        AircraftModel::Fighter => (1.2, 1.0, 1.5),
        AircraftModel::Bomber => (0.8, 1.0, 0.7),
        AircraftModel::Scout => (1.0, 1.3, 1.0),
        _ => (1.0, 1.0, 1.0),
    };

    // Base angular rate comes from the airframe's turn rate (per tick,
    // scaled to per-second); yaw is lazier and roll livelier.
    let turn = turn_rate * TICK_RATE as f64;
    ang_vel.pitch = pitch_input * turn * pitch_authority * effectiveness;
    ang_vel.yaw = yaw_input * turn * 0.75 * yaw_authority * effectiveness;
    ang_vel.roll = roll_input * turn * 1.5 * roll_authority * effectiveness;

    // Hands-off stabilization levels the aircraft, unless stalled.
    if !state.is_stalling {
        if controls.pitch.abs() <= 0.01 {
            ang_vel.pitch += -attitude.0.pitch * 0.3;
        }
        if controls.roll.abs() <= 0.01 {
            ang_vel.roll += -attitude.0.roll * 0.5;
        }
    }
}
