//! Enemy aircraft control system.
//!
//! Bridges the ECS world and the pure behavior FSM: gathers each
//! enemy's surroundings into an `EnemyContext`, evaluates the FSM, then
//! applies steering, attitude smoothing, and weapon fire. Updates are
//! buffered and applied after all queries release their borrows.

use std::collections::HashMap;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::components::{
    Attitude, Downed, EnemyAgent, EnemyId, Health, Island, PlayerTag, Position, Velocity, Weapon,
    Wreck,
};
use skyward_core::constants::*;
use skyward_core::enums::{BehaviorState, Faction, ProjectileOwner, WeaponKind};
use skyward_core::events::AudioEvent;
use skyward_core::types::{Orientation, Vec3};

use skyward_ai::fsm::{self, EnemyContext, LeaderPose};
use skyward_ai::profiles::get_profile;
use skyward_ai::steering::{self, Obstacle};

use crate::world_setup::{spawn_explosion, spawn_projectile};

struct AgentUpdate {
    entity: hecs::Entity,
    behavior: BehaviorState,
    alert: f64,
    velocity: Vec3,
    attitude: Orientation,
    advance_waypoint: bool,
    retreat_target: Option<Vec3>,
    clear_retreat_target: bool,
    fire: Option<FireOrder>,
}

struct FireOrder {
    owner_id: EnemyId,
    kind: WeaponKind,
    damage: u32,
    position: Vec3,
    forward: Vec3,
    projectile_speed: f64,
    range: f64,
}

/// Run one AI step for every live enemy.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<AudioEvent>,
    current_tick: u64,
) {
    // Attack-position jitter refresh, before contexts are built.
    for (_entity, agent) in world.query_mut::<&mut EnemyAgent>() {
        if current_tick >= agent.offset_refresh_tick {
            agent.attack_offset = Vec3::new(
                (rng.gen::<f64>() - 0.5) * 30.0,
                (rng.gen::<f64>() - 0.5) * 10.0 + 5.0,
                (rng.gen::<f64>() - 0.5) * 30.0,
            );
            agent.offset_refresh_tick =
                current_tick + (ATTACK_OFFSET_REFRESH_SECS * TICK_RATE as f64) as u64;
        }
    }

    let player = world
        .query::<(&PlayerTag, &Position)>()
        .without::<&Downed>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.0);

    let islands: Vec<(Obstacle, Option<Faction>)> = world
        .query::<(&Island, &Position)>()
        .iter()
        .map(|(_, (island, pos))| {
            (
                Obstacle {
                    position: pos.0,
                    size: island.size,
                },
                island.faction,
            )
        })
        .collect();
    let obstacles: Vec<Obstacle> = islands.iter().map(|(o, _)| *o).collect();

    // Leader poses and neighbor positions keyed by stable id.
    let mut leader_poses: HashMap<EnemyId, LeaderPose> = HashMap::new();
    let mut neighbor_positions: Vec<(EnemyId, Vec3)> = Vec::new();
    for (_entity, (agent, pos, attitude)) in world
        .query::<(&EnemyAgent, &Position, &Attitude)>()
        .without::<&Wreck>()
        .iter()
    {
        leader_poses.insert(
            agent.id,
            LeaderPose {
                position: pos.0,
                yaw: attitude.0.yaw,
            },
        );
        neighbor_positions.push((agent.id, pos.0));
    }

    let mut updates: Vec<AgentUpdate> = Vec::new();
    for (entity, (agent, pos, vel, attitude, weapon, health)) in world
        .query::<(&EnemyAgent, &Position, &Velocity, &Attitude, &Weapon, &Health)>()
        .without::<&Wreck>()
        .iter()
    {
        let profile = get_profile(agent.preset);
        let forward = attitude.0.forward();

        let (player_position, distance_to_player) = match player {
            Some(p) => (p, pos.0.distance_to(&p)),
            // Downed player: far enough to decay alert and end pursuits.
            None => (pos.0, f64::INFINITY),
        };

        let cooldown_ticks = (weapon.cooldown_secs * TICK_RATE as f64) as u64;
        let cooldown_ready =
            weapon.last_fired_tick == 0 || current_tick >= weapon.last_fired_tick + cooldown_ticks;

        let ctx = EnemyContext {
            behavior: agent.behavior,
            alert: agent.alert,
            health: health.hp,
            position: pos.0,
            forward,
            player_position,
            distance_to_player,
            cooldown_ready,
            attack_offset: agent.attack_offset,
            patrol_route: &agent.patrol_route,
            patrol_index: agent.patrol_index,
            retreat_target: agent.retreat_target,
            friendly_island: friendly_island(&islands, agent.faction, pos.0),
            leader: agent
                .formation_leader
                .and_then(|id| leader_poses.get(&id).copied()),
            formation_offset: agent.formation_offset,
        };

        let update = fsm::evaluate(&ctx, &profile);

        let neighbors: Vec<Vec3> = neighbor_positions
            .iter()
            .filter(|(id, _)| *id != agent.id)
            .map(|(_, p)| *p)
            .collect();
        let avoid = steering::avoidance(pos.0, &obstacles, &neighbors);
        let aircraft = skyward_flight::profiles::get_profile(agent.model);
        let new_velocity = steering::steer_velocity(
            vel.0,
            pos.0,
            update.move_target,
            avoid,
            update.new_behavior,
            profile.max_speed,
            aircraft.drag,
        );
        let new_attitude = steering::turn_toward(attitude.0, new_velocity, profile.rotation_speed);

        let fire = if update.fire {
            Some(FireOrder {
                owner_id: agent.id,
                kind: weapon.kind,
                damage: weapon.damage,
                position: pos.0,
                forward,
                projectile_speed: weapon.projectile_speed,
                range: weapon.range,
            })
        } else {
            None
        };

        updates.push(AgentUpdate {
            entity,
            behavior: update.new_behavior,
            alert: update.new_alert,
            velocity: new_velocity,
            attitude: new_attitude,
            advance_waypoint: update.advance_waypoint,
            retreat_target: update.new_retreat_target,
            clear_retreat_target: update.new_behavior != BehaviorState::Retreating,
            fire,
        });
    }

    for update in updates {
        if let Ok(mut agent) = world.get::<&mut EnemyAgent>(update.entity) {
            agent.behavior = update.behavior;
            agent.alert = update.alert;
            if update.advance_waypoint && !agent.patrol_route.is_empty() {
                agent.patrol_index = (agent.patrol_index + 1) % agent.patrol_route.len();
            }
            if let Some(target) = update.retreat_target {
                agent.retreat_target = Some(target);
            } else if update.clear_retreat_target {
                agent.retreat_target = None;
            }
        }
        if let Ok(mut vel) = world.get::<&mut Velocity>(update.entity) {
            vel.0 = update.velocity;
        }
        if let Ok(mut attitude) = world.get::<&mut Attitude>(update.entity) {
            attitude.0 = update.attitude;
        }

        if let Some(order) = update.fire {
            if let Ok(mut weapon) = world.get::<&mut Weapon>(update.entity) {
                weapon.last_fired_tick = current_tick;
            }
            let muzzle = order.position.add(&order.forward.scale(2.0));
            spawn_projectile(
                world,
                ProjectileOwner::Enemy(order.owner_id.0),
                order.kind,
                order.damage,
                muzzle,
                order.forward.scale(order.projectile_speed),
                order.range,
            );
            spawn_explosion(
                world,
                order.position.add(&order.forward.scale(2.5)),
                EXPLOSION_SCALE_MUZZLE,
            );
            events.push(AudioEvent::WeaponFired { kind: order.kind });
        }
    }
}

/// Nearest island held by the agent's faction, lifted to a safe
/// approach altitude.
fn friendly_island(
    islands: &[(Obstacle, Option<Faction>)],
    faction: Faction,
    position: Vec3,
) -> Option<Vec3> {
    islands
        .iter()
        .filter(|(_, f)| *f == Some(faction))
        .min_by(|(a, _), (b, _)| {
            let da = position.distance_to(&a.position);
            let db = position.distance_to(&b.position);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(island, _)| {
            Vec3::new(
                island.position.x,
                island.position.y + island.size * 2.0,
                island.position.z,
            )
        })
}
