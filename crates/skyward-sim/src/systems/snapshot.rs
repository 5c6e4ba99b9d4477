//! Snapshot assembly.
//!
//! Builds the per-tick `WorldSnapshot` from the ECS world plus the
//! engine-owned session state (time, phase, environment, missions,
//! progress, and the drained event queues).

use hecs::World;

use skyward_core::components::{
    Airframe, Attitude, Downed, EnemyAgent, Explosion, Health, Loadout, Pickup, PlayerState,
    PlayerTag, Position, Projectile, Velocity, Wreck,
};
use skyward_core::constants::{EXPLOSION_LIFETIME_SECS, TICK_RATE};
use skyward_core::enums::{GamePhase, ProjectileOwner};
use skyward_core::events::{AudioEvent, GameEvent};
use skyward_core::state::*;
use skyward_core::types::SimTime;

use crate::missions::MissionLog;
use crate::progress::PlayerProgress;
use crate::systems::environment::EnvironmentState;

/// Build the snapshot for the current tick. Events are moved out of
/// the queues, so each event is delivered exactly once.
#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    time: SimTime,
    phase: GamePhase,
    environment: &EnvironmentState,
    missions: &MissionLog,
    progress: &PlayerProgress,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        player: player_view(world, time.tick),
        enemies: enemy_views(world),
        projectiles: projectile_views(world),
        explosions: explosion_views(world),
        pickups: pickup_views(world),
        environment: EnvironmentView {
            day_cycle: environment.day_cycle,
            weather: environment.weather,
        },
        missions: missions.views(),
        progress: ProgressView {
            credits: progress.credits,
            experience: progress.experience,
            level: progress.level,
            rank: progress.rank().to_string(),
        },
        events: std::mem::take(events),
        audio_events: std::mem::take(audio_events),
    }
}

fn player_view(world: &World, current_tick: u64) -> PlayerView {
    let mut query = world.query::<(
        &PlayerTag,
        &Position,
        &Velocity,
        &Attitude,
        &Health,
        &PlayerState,
        &Airframe,
        &Loadout,
    )>();
    let Some((entity, (_, pos, vel, attitude, health, state, airframe, loadout))) =
        query.iter().next()
    else {
        return PlayerView::default();
    };

    let downed = world.satisfies::<&Downed>(entity).unwrap_or(false);
    PlayerView {
        position: pos.0,
        rotation: attitude.0,
        velocity: vel.0,
        speed: vel.0.length(),
        model: airframe.model,
        health: if downed { 0.0 } else { health.hp },
        max_health: health.max,
        fuel: state.fuel,
        throttle: state.throttle,
        g_force: state.g_force,
        is_stalling: state.is_stalling,
        low_altitude_warning: state.low_altitude_warning,
        weapons: loadout
            .weapons
            .iter()
            .map(|w| WeaponView {
                kind: w.kind,
                ammo: w.ammo,
                max_ammo: w.max_ammo,
                cooldown_remaining: cooldown_remaining(
                    w.last_fired_tick,
                    w.cooldown_secs,
                    current_tick,
                ),
            })
            .collect(),
        selected_weapon: loadout.selected,
    }
}

fn cooldown_remaining(last_fired_tick: u64, cooldown_secs: f64, current_tick: u64) -> f64 {
    if last_fired_tick == 0 {
        return 0.0;
    }
    let ready_tick = last_fired_tick + (cooldown_secs * TICK_RATE as f64) as u64;
    ready_tick.saturating_sub(current_tick) as f64 / TICK_RATE as f64
}

fn enemy_views(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&EnemyAgent, &Position, &Velocity, &Attitude, &Health)>()
        .iter()
        .map(|(entity, (agent, pos, vel, attitude, health))| EnemyView {
            id: agent.id,
            preset: agent.preset,
            faction: agent.faction,
            model: agent.model,
            position: pos.0,
            rotation: attitude.0,
            velocity: vel.0,
            health: health.hp,
            max_health: health.max,
            behavior: agent.behavior,
            alive: !world.satisfies::<&Wreck>(entity).unwrap_or(false),
        })
        .collect();
    // Stable order keeps snapshots byte-identical across runs.
    views.sort_by_key(|v| v.id);
    views
}

fn projectile_views(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            position: pos.0,
            velocity: vel.0,
            kind: projectile.kind,
            from_player: projectile.owner == ProjectileOwner::Player,
        })
        .collect()
}

fn explosion_views(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (explosion, pos))| ExplosionView {
            position: pos.0,
            scale: explosion.scale,
            progress: (explosion.lifetime_secs / EXPLOSION_LIFETIME_SECS).clamp(0.0, 1.0),
        })
        .collect()
}

fn pickup_views(world: &World) -> Vec<PickupView> {
    world
        .query::<(&Pickup, &Position)>()
        .iter()
        .map(|(_, (pickup, pos))| PickupView {
            kind: pickup.kind,
            position: pos.0,
        })
        .collect()
}
