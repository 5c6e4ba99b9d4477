//! Ambient enemy spawner.
//!
//! Periodically rolls for new enemies around the player, scaled by
//! difficulty and player level. Spawns single aircraft or small
//! formations, with presets drawn from the zone the player is flying
//! through.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::components::{EnemyAgent, EnemyId, Island, Position, Wreck};
use skyward_core::constants::*;
use skyward_core::enums::{EnemyPreset, Zone};
use skyward_core::types::Vec3;

use crate::world_setup::{formation_offset, spawn_enemy, FOLLOWER_SLOTS};

/// Engine-owned spawner state.
#[derive(Debug, Clone, Default)]
pub struct SpawnerState {
    pub last_spawn_tick: u64,
}

/// Presets available per zone, gated by player level.
fn zone_presets(zone: Zone) -> &'static [(EnemyPreset, u32)] {
    match zone {
        Zone::StartingIslands => &[
            (EnemyPreset::PirateFighter, 1),
            (EnemyPreset::MilitaryPatrol, 2),
            (EnemyPreset::MercenaryScout, 3),
        ],
        Zone::VolcanicZone => &[
            (EnemyPreset::PirateFighter, 3),
            (EnemyPreset::PirateBomber, 4),
            (EnemyPreset::MilitaryElite, 5),
        ],
        Zone::CrystalZone => &[
            (EnemyPreset::MercenaryScout, 4),
            (EnemyPreset::MilitaryElite, 5),
        ],
        Zone::AncientZone => &[
            (EnemyPreset::PirateBomber, 5),
            (EnemyPreset::MilitaryElite, 6),
            (EnemyPreset::SkyKraken, 8),
        ],
    }
}

/// Run one spawner step. Returns without spawning unless the cooldown
/// has elapsed and the spawn roll succeeds.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut SpawnerState,
    player_position: Vec3,
    player_level: u32,
    difficulty: f64,
    next_enemy_id: &mut u32,
    current_tick: u64,
) {
    let live_count = world
        .query::<&EnemyAgent>()
        .without::<&Wreck>()
        .iter()
        .count();
    if live_count >= MAX_ENEMIES {
        return;
    }

    // Cooldown counts from the last successful spawn; once it elapses
    // the roll repeats every tick until one lands.
    let cooldown_ticks = (SPAWN_COOLDOWN_SECS * TICK_RATE as f64) as u64;
    if current_tick.saturating_sub(state.last_spawn_tick) < cooldown_ticks {
        return;
    }

    let difficulty_factor = (player_level as f64 / 10.0).min(1.0) * difficulty;
    let population_factor = 1.0 - live_count as f64 / MAX_ENEMIES as f64;
    if rng.gen::<f64>() >= SPAWN_BASE_CHANCE * difficulty_factor * population_factor {
        return;
    }

    let zone = nearest_zone(world, player_position);
    let eligible: Vec<EnemyPreset> = zone_presets(zone)
        .iter()
        .filter(|(_, min_level)| player_level >= *min_level)
        .map(|(preset, _)| *preset)
        .collect();
    let preset = match eligible.as_slice() {
        [] => return,
        presets => presets[rng.gen_range(0..presets.len())],
    };

    let position = match find_spawn_position(world, rng, player_position) {
        Some(p) => p,
        None => return,
    };

    let mut group_size = 1;
    if rng.gen::<f64>() < FORMATION_BASE_CHANCE * difficulty_factor {
        group_size = (2 + (rng.gen::<f64>() * 3.0 * difficulty_factor) as usize)
            .min(FORMATION_MAX_SIZE);
    }

    state.last_spawn_tick = current_tick;

    let leader_id = EnemyId(*next_enemy_id);
    *next_enemy_id += 1;
    spawn_enemy(world, rng, preset, position, leader_id, None);
    log::debug!(
        "spawned {:?} x{} at ({:.0}, {:.0}, {:.0})",
        preset,
        group_size,
        position.x,
        position.y,
        position.z
    );

    for slot in FOLLOWER_SLOTS.iter().take(group_size.saturating_sub(1)) {
        let offset = formation_offset(*slot);
        let follower_id = EnemyId(*next_enemy_id);
        *next_enemy_id += 1;
        spawn_enemy(
            world,
            rng,
            preset,
            position.add(&offset),
            follower_id,
            Some((leader_id, offset)),
        );
    }
}

/// Zone of the island nearest to a position.
fn nearest_zone(world: &World, position: Vec3) -> Zone {
    let mut best: Option<(f64, Zone)> = None;
    for (_entity, (island, pos)) in world.query::<(&Island, &Position)>().iter() {
        let distance = pos.0.distance_to(&position);
        let closer = match best {
            Some((d, _)) => distance < d,
            None => true,
        };
        if closer {
            best = Some((distance, island.zone));
        }
    }
    best.map(|(_, zone)| zone).unwrap_or(Zone::StartingIslands)
}

/// Sample a spawn position in an annulus around the player, clear of
/// islands and other enemies. Returns None if every attempt collides.
fn find_spawn_position(world: &World, rng: &mut ChaCha8Rng, player_position: Vec3) -> Option<Vec3> {
    for _ in 0..SPAWN_MAX_ATTEMPTS {
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let radius = SPAWN_RADIUS_MIN + rng.gen::<f64>() * (SPAWN_RADIUS_MAX - SPAWN_RADIUS_MIN);
        let candidate = Vec3::new(
            player_position.x + angle.cos() * radius,
            SPAWN_HEIGHT_MIN + rng.gen::<f64>() * (SPAWN_HEIGHT_MAX - SPAWN_HEIGHT_MIN),
            player_position.z + angle.sin() * radius,
        );

        let mut clear = true;
        for (_entity, (island, pos)) in world.query::<(&Island, &Position)>().iter() {
            if pos.0.distance_to(&candidate) < island.size * SPAWN_ISLAND_CLEARANCE_FACTOR {
                clear = false;
                break;
            }
        }
        if clear {
            for (_entity, (_agent, pos)) in world.query::<(&EnemyAgent, &Position)>().iter() {
                if pos.0.distance_to(&candidate) < SPAWN_ENEMY_CLEARANCE {
                    clear = false;
                    break;
                }
            }
        }
        if clear {
            return Some(candidate);
        }
    }
    None
}
