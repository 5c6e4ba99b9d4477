//! Collision and damage resolution.
//!
//! Projectile hits use a swept segment-vs-sphere test against the
//! previous tick's position so fast rounds cannot tunnel through
//! targets. Aircraft-vs-island and aircraft-vs-aircraft impacts apply
//! speed-scaled ram damage. Pickups and checkpoints trigger here too.
//!
//! All world mutation is buffered: queries collect hits first, then
//! effects are applied after every borrow is released.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::components::{
    Airframe, Checkpoint, Downed, EnemyAgent, EnemyId, Health, Island, Loadout, Pickup,
    PlayerState, PlayerTag, Position, Projectile, Velocity, Wreck,
};
use skyward_core::constants::*;
use skyward_core::enums::{BehaviorState, PickupKind, ProjectileOwner};
use skyward_core::events::{AudioEvent, GameEvent};
use skyward_core::types::Vec3;

use skyward_flight::damage::{
    collision_damage, impact_explosion_scale, projectile_damage_taken, ImpactSurface,
};
use skyward_flight::profiles::get_profile;

use crate::missions::MissionLog;
use crate::progress::PlayerProgress;
use crate::scheduler::{DeferredEffect, TimerQueue};
use crate::world_setup::{roll_pickup_drop, spawn_explosion, spawn_pickup};

enum ProjectileHit {
    Island { point: Vec3 },
    Enemy { target: Entity, damage: u32, point: Vec3 },
    Player { damage: u32, point: Vec3 },
}

/// Resolve all collisions for this tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    progress: &mut PlayerProgress,
    missions: &mut MissionLog,
    timers: &mut TimerQueue,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
    current_tick: u64,
) {
    let islands: Vec<(Vec3, f64)> = world
        .query::<(&Island, &Position)>()
        .iter()
        .map(|(_, (island, pos))| (pos.0, island.size))
        .collect();

    let player = world
        .query::<(&PlayerTag, &Position, &Velocity, &Airframe)>()
        .without::<&Downed>()
        .iter()
        .next()
        .map(|(entity, (_, pos, vel, airframe))| {
            let profile = get_profile(airframe.model);
            (entity, pos.0, vel.0, profile.collision_radius(), airframe.armor_level)
        });

    resolve_projectiles(world, &islands, player, despawn_buffer, events, audio_events);
    resolve_ram_impacts(world, &islands, player, events, audio_events);
    resolve_pickups(world, rng, player, progress, despawn_buffer, events, audio_events);
    resolve_checkpoints(world, player, progress, missions, events, audio_events);
    resolve_deaths(
        world,
        rng,
        progress,
        missions,
        timers,
        events,
        audio_events,
        current_tick,
    );
}

fn resolve_projectiles(
    world: &mut World,
    islands: &[(Vec3, f64)],
    player: Option<(Entity, Vec3, Vec3, f64, u32)>,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    let enemies: Vec<(Entity, Vec3, f64)> = world
        .query::<(&EnemyAgent, &Position)>()
        .without::<&Wreck>()
        .iter()
        .map(|(entity, (agent, pos))| {
            (entity, pos.0, get_profile(agent.model).collision_radius())
        })
        .collect();

    let mut hits: Vec<(Entity, ProjectileHit)> = Vec::new();
    for (entity, (projectile, pos)) in world.query::<(&Projectile, &Position)>().iter() {
        let from = projectile.prev_position;
        let to = pos.0;

        let island_hit = islands
            .iter()
            .find(|(center, size)| segment_hits_sphere(from, to, *center, *size));
        if let Some((center, size)) = island_hit {
            let point = center.add(&center.direction_to(&to).scale(*size));
            hits.push((entity, ProjectileHit::Island { point }));
            continue;
        }

        match projectile.owner {
            ProjectileOwner::Player => {
                let target = enemies
                    .iter()
                    .find(|(_, center, radius)| segment_hits_sphere(from, to, *center, *radius));
                if let Some((target, center, _)) = target {
                    hits.push((
                        entity,
                        ProjectileHit::Enemy {
                            target: *target,
                            damage: projectile.damage,
                            point: *center,
                        },
                    ));
                }
            }
            ProjectileOwner::Enemy(_) => {
                if let Some((_, center, _, radius, armor)) = player {
                    if segment_hits_sphere(from, to, center, radius) {
                        hits.push((
                            entity,
                            ProjectileHit::Player {
                                damage: projectile_damage_taken(projectile.damage, armor),
                                point: center,
                            },
                        ));
                    }
                }
            }
        }
    }

    for (projectile_entity, hit) in hits {
        despawn_buffer.push(projectile_entity);
        match hit {
            ProjectileHit::Island { point } => {
                spawn_explosion(world, point, EXPLOSION_SCALE_ISLAND_HIT);
            }
            ProjectileHit::Enemy { target, damage, point } => {
                if let Ok(mut health) = world.get::<&mut Health>(target) {
                    health.hp = (health.hp - damage as f64).max(0.0);
                }
                // Getting shot is a full alert, whatever the FSM thought.
                if let Ok(mut agent) = world.get::<&mut EnemyAgent>(target) {
                    agent.alert = 1.0;
                    if agent.behavior != BehaviorState::Retreating {
                        agent.behavior = BehaviorState::Attacking;
                    }
                }
                spawn_explosion(world, point, EXPLOSION_SCALE_HIT);
                audio_events.push(AudioEvent::Hit);
            }
            ProjectileHit::Player { damage, point } => {
                if let Some((player_entity, ..)) = player {
                    if let Ok(mut health) = world.get::<&mut Health>(player_entity) {
                        health.hp = (health.hp - damage as f64).max(0.0);
                    }
                }
                if damage > 0 {
                    events.push(GameEvent::Notification {
                        message: format!("Hit! -{} health", damage),
                    });
                }
                spawn_explosion(world, point, EXPLOSION_SCALE_HIT);
                audio_events.push(AudioEvent::Hit);
            }
        }
    }
}

fn resolve_ram_impacts(
    world: &mut World,
    islands: &[(Vec3, f64)],
    player: Option<(Entity, Vec3, Vec3, f64, u32)>,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    resolve_enemy_island_impacts(world, islands, audio_events);

    let Some((player_entity, player_pos, player_vel, player_radius, armor)) = player else {
        return;
    };
    let speed = player_vel.length();

    // Island impact: damage, then bounce the aircraft off the surface.
    for (center, size) in islands {
        let limit = *size + player_radius;
        if player_pos.distance_to(center) >= limit {
            continue;
        }
        let damage = collision_damage(speed, ImpactSurface::Island, armor);
        apply_player_impact(world, player_entity, damage, events, audio_events);

        let normal = center.direction_to(&player_pos);
        if let Ok(mut pos) = world.get::<&mut Position>(player_entity) {
            pos.0 = center.add(&normal.scale(limit + 0.1));
        }
        if let Ok(mut vel) = world.get::<&mut Velocity>(player_entity) {
            let along = vel.0.dot(&normal);
            if along < 0.0 {
                vel.0 = vel.0.sub(&normal.scale(along)).scale(0.5);
            }
        }
        return;
    }

    // Aircraft ram: both sides take speed-scaled damage.
    let mut rammed: Option<(Entity, Vec3)> = None;
    for (entity, (agent, pos)) in world
        .query::<(&EnemyAgent, &Position)>()
        .without::<&Wreck>()
        .iter()
    {
        let radius = get_profile(agent.model).collision_radius() + player_radius;
        if player_pos.distance_to(&pos.0) < radius {
            rammed = Some((entity, pos.0));
            break;
        }
    }
    if let Some((enemy_entity, enemy_pos)) = rammed {
        let player_damage = collision_damage(speed, ImpactSurface::EnemyAircraft, armor);
        apply_player_impact(world, player_entity, player_damage, events, audio_events);

        let enemy_damage = collision_damage(speed, ImpactSurface::PlayerAircraft, 1);
        if let Ok(mut health) = world.get::<&mut Health>(enemy_entity) {
            health.hp = (health.hp - enemy_damage as f64).max(0.0);
        }

        // Shove both apart so the impact does not repeat next tick.
        let away = enemy_pos.direction_to(&player_pos);
        if let Ok(mut vel) = world.get::<&mut Velocity>(player_entity) {
            vel.0 = vel.0.add(&away.scale(0.2));
        }
        if let Ok(mut vel) = world.get::<&mut Velocity>(enemy_entity) {
            vel.0 = vel.0.sub(&away.scale(0.2));
        }
    }
}

/// Enemies flying into terrain take the same speed-scaled island
/// damage as the player and bounce off the surface. Avoidance steering
/// is soft, so overlaps do happen.
fn resolve_enemy_island_impacts(
    world: &mut World,
    islands: &[(Vec3, f64)],
    audio_events: &mut Vec<AudioEvent>,
) {
    let mut impacts: Vec<(Entity, Vec3, f64, f64)> = Vec::new();
    for (entity, (agent, pos, vel)) in world
        .query::<(&EnemyAgent, &Position, &Velocity)>()
        .without::<&Wreck>()
        .iter()
    {
        let radius = get_profile(agent.model).collision_radius();
        for (center, size) in islands {
            let limit = *size + radius;
            if pos.0.distance_to(center) < limit {
                impacts.push((entity, *center, limit, vel.0.length()));
                break;
            }
        }
    }

    for (entity, center, limit, speed) in impacts {
        let damage = collision_damage(speed, ImpactSurface::Island, 1);
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            health.hp = (health.hp - damage as f64).max(0.0);
        }

        let position = world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .unwrap_or(center);
        let normal = center.direction_to(&position);
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            pos.0 = center.add(&normal.scale(limit + 0.1));
        }
        if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
            let along = vel.0.dot(&normal);
            if along < 0.0 {
                vel.0 = vel.0.sub(&normal.scale(along)).scale(0.5);
            }
        }

        if damage > IMPACT_EXPLOSION_THRESHOLD {
            let scale = impact_explosion_scale(damage);
            spawn_explosion(world, position, scale);
            audio_events.push(AudioEvent::Explosion { scale });
        }
    }
}

fn apply_player_impact(
    world: &mut World,
    player_entity: Entity,
    damage: u32,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    if let Ok(mut health) = world.get::<&mut Health>(player_entity) {
        health.hp = (health.hp - damage as f64).max(0.0);
    }
    let position = world
        .get::<&Position>(player_entity)
        .map(|p| p.0)
        .unwrap_or(Vec3::ZERO);
    if damage > IMPACT_EXPLOSION_THRESHOLD {
        let scale = impact_explosion_scale(damage);
        spawn_explosion(world, position, scale);
        audio_events.push(AudioEvent::Explosion { scale });
    }
    if damage > IMPACT_NOTIFY_THRESHOLD {
        events.push(GameEvent::Notification {
            message: format!("Collision! -{} health", damage),
        });
    }
}

fn resolve_pickups(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: Option<(Entity, Vec3, Vec3, f64, u32)>,
    progress: &mut PlayerProgress,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some((player_entity, player_pos, ..)) = player else {
        return;
    };

    let mut collected: Vec<(Entity, PickupKind)> = Vec::new();
    for (entity, (pickup, pos)) in world.query::<(&Pickup, &Position)>().iter() {
        if player_pos.distance_to(&pos.0) < pickup.radius {
            collected.push((entity, pickup.kind));
        }
    }

    for (entity, kind) in collected {
        despawn_buffer.push(entity);
        audio_events.push(AudioEvent::PickupCollected { kind });
        match kind {
            PickupKind::Health => {
                if let Ok(mut health) = world.get::<&mut Health>(player_entity) {
                    health.hp = (health.hp + PICKUP_HEALTH).min(health.max);
                }
                events.push(GameEvent::Notification {
                    message: "Repairs +25 health".to_string(),
                });
            }
            PickupKind::Fuel => {
                if let Ok(mut state) = world.get::<&mut PlayerState>(player_entity) {
                    state.fuel = (state.fuel + PICKUP_FUEL).min(100.0);
                }
                events.push(GameEvent::Notification {
                    message: "Refueled +30 fuel".to_string(),
                });
            }
            PickupKind::Ammo => {
                if let Ok(mut loadout) = world.get::<&mut Loadout>(player_entity) {
                    for weapon in &mut loadout.weapons {
                        weapon.ammo = weapon.max_ammo;
                    }
                }
                events.push(GameEvent::Notification {
                    message: "Ammunition restocked".to_string(),
                });
            }
            PickupKind::Credits => {
                let amount = PICKUP_CREDITS_BASE + rng.gen_range(0..100);
                progress.add_credits(amount);
                events.push(GameEvent::Notification {
                    message: format!("+{} credits", amount),
                });
            }
            PickupKind::Experience => {
                let amount = PICKUP_EXPERIENCE_BASE + rng.gen_range(0..50);
                award_experience(progress, amount, events, audio_events);
                events.push(GameEvent::Notification {
                    message: format!("+{} experience", amount),
                });
            }
        }
    }
}

fn resolve_checkpoints(
    world: &mut World,
    player: Option<(Entity, Vec3, Vec3, f64, u32)>,
    progress: &mut PlayerProgress,
    missions: &mut MissionLog,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    let Some((_, player_pos, ..)) = player else {
        return;
    };

    let mut triggered: Vec<String> = Vec::new();
    for (_entity, (checkpoint, pos)) in world.query_mut::<(&mut Checkpoint, &Position)>() {
        if !checkpoint.triggered && player_pos.distance_to(&pos.0) < checkpoint.radius {
            checkpoint.triggered = true;
            triggered.push(checkpoint.id.clone());
        }
    }

    for checkpoint_id in triggered {
        audio_events.push(AudioEvent::CheckpointReached);
        events.push(GameEvent::Notification {
            message: "Checkpoint reached!".to_string(),
        });
        award_experience(progress, CHECKPOINT_EXPERIENCE, events, audio_events);

        let outcome = missions.on_checkpoint(&checkpoint_id);
        progress.add_credits(outcome.credits);
        award_experience(progress, outcome.experience, events, audio_events);
        events.extend(outcome.events);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_deaths(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    progress: &mut PlayerProgress,
    missions: &mut MissionLog,
    timers: &mut TimerQueue,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
    current_tick: u64,
) {
    // Enemy destruction.
    let mut destroyed: Vec<(Entity, EnemyId, Vec3)> = Vec::new();
    for (entity, (agent, pos, health)) in world
        .query::<(&EnemyAgent, &Position, &Health)>()
        .without::<&Wreck>()
        .iter()
    {
        if health.hp <= 0.0 {
            destroyed.push((entity, agent.id, pos.0));
        }
    }

    for (entity, id, position) in destroyed {
        let preset = match world.get::<&EnemyAgent>(entity) {
            Ok(agent) => agent.preset,
            Err(_) => continue,
        };
        let profile = skyward_ai::profiles::get_profile(preset);

        let _ = world.insert_one(entity, Wreck);
        timers.schedule_in(current_tick, WRECK_GRACE_SECS, DeferredEffect::DespawnWreck(id));

        spawn_explosion(world, position, EXPLOSION_SCALE_DESTRUCTION);
        events.push(GameEvent::ExplosionSpawned {
            position,
            scale: EXPLOSION_SCALE_DESTRUCTION,
        });
        audio_events.push(AudioEvent::Explosion {
            scale: EXPLOSION_SCALE_DESTRUCTION,
        });

        progress.add_credits(profile.credits);
        award_experience(progress, profile.experience, events, audio_events);
        events.push(GameEvent::EnemyDestroyed {
            id,
            preset,
            experience: profile.experience,
            credits: profile.credits,
        });
        events.push(GameEvent::Notification {
            message: format!("+{} credits, +{} XP", profile.credits, profile.experience),
        });

        let outcome = missions.on_enemy_killed(preset, profile.faction);
        progress.add_credits(outcome.credits);
        award_experience(progress, outcome.experience, events, audio_events);
        events.extend(outcome.events);

        if let Some((kind, drop_pos)) = roll_pickup_drop(rng, position) {
            spawn_pickup(world, kind, drop_pos);
        }
    }

    // Player destruction.
    let downed = world
        .query::<(&PlayerTag, &Health)>()
        .without::<&Downed>()
        .iter()
        .next()
        .filter(|(_, (_, health))| health.hp <= 0.0)
        .map(|(entity, _)| entity);

    if let Some(player_entity) = downed {
        let position = world
            .get::<&Position>(player_entity)
            .map(|p| p.0)
            .unwrap_or(Vec3::ZERO);
        let _ = world.insert_one(player_entity, Downed);
        if let Ok(mut vel) = world.get::<&mut Velocity>(player_entity) {
            vel.0 = Vec3::ZERO;
        }

        spawn_explosion(world, position, EXPLOSION_SCALE_DESTRUCTION);
        events.push(GameEvent::ExplosionSpawned {
            position,
            scale: EXPLOSION_SCALE_DESTRUCTION,
        });
        audio_events.push(AudioEvent::Explosion {
            scale: EXPLOSION_SCALE_DESTRUCTION,
        });

        let penalty = progress.apply_death_penalty();
        events.push(GameEvent::PlayerDestroyed { penalty });
        events.push(GameEvent::Notification {
            message: if penalty > 0 {
                format!("Aircraft destroyed! -{} credits", penalty)
            } else {
                "Aircraft destroyed!".to_string()
            },
        });
        timers.schedule_in(current_tick, RESPAWN_DELAY_SECS, DeferredEffect::RespawnPlayer);
    }
}

fn award_experience(
    progress: &mut PlayerProgress,
    amount: u32,
    events: &mut Vec<GameEvent>,
    audio_events: &mut Vec<AudioEvent>,
) {
    if amount == 0 {
        return;
    }
    if let Some(level) = progress.add_experience(amount) {
        audio_events.push(AudioEvent::LevelUp { level });
        events.push(GameEvent::Notification {
            message: format!("Level up! You are now {}", progress.rank()),
        });
    }
}

/// Swept hit test: does the segment `from → to` pass within `radius`
/// of `center`?
fn segment_hits_sphere(from: Vec3, to: Vec3, center: Vec3, radius: f64) -> bool {
    let d = to.sub(&from);
    let length_sq = d.dot(&d);
    let t = if length_sq <= 1e-12 {
        0.0
    } else {
        (center.sub(&from).dot(&d) / length_sq).clamp(0.0, 1.0)
    };
    let closest = from.add(&d.scale(t));
    closest.distance_to(&center) <= radius
}
