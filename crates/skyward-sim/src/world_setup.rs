//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player aircraft, islands, checkpoints, enemies,
//! projectiles, explosions, and pickups with appropriate component
//! bundles.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyward_core::components::*;
use skyward_core::constants::*;
use skyward_core::enums::*;
use skyward_core::types::{Orientation, Vec3};

use skyward_ai::patrol;
use skyward_ai::profiles::get_profile;

/// Set up the initial world: player aircraft, islands, and the
/// tutorial checkpoints.
pub fn setup_world(world: &mut World, model: AircraftModel, engine_level: u32, armor_level: u32) {
    spawn_player(world, model, engine_level, armor_level);
    spawn_islands(world);
    spawn_checkpoints(world);
}

/// Spawn the player aircraft at the start position with the default
/// machinegun loadout.
pub fn spawn_player(
    world: &mut World,
    model: AircraftModel,
    engine_level: u32,
    armor_level: u32,
) -> hecs::Entity {
    world.spawn((
        PlayerTag,
        Position(Vec3::new(0.0, RESPAWN_HEIGHT, 0.0)),
        Velocity(Vec3::new(0.0, 0.0, 0.2)),
        Attitude(Orientation::default()),
        AngularVelocity::default(),
        Health {
            hp: 100.0,
            max: 100.0,
        },
        PlayerState {
            throttle: 0.5,
            fuel: 100.0,
            is_stalling: false,
            stall_assist_until_tick: 0,
            low_altitude_warning: false,
            g_force: 1.0,
        },
        Airframe {
            model,
            engine_level,
            armor_level,
        },
        Loadout {
            weapons: vec![default_machinegun()],
            selected: 0,
            firing: false,
        },
    ))
}

/// The starting weapon every new pilot carries.
pub fn default_machinegun() -> Weapon {
    Weapon {
        kind: WeaponKind::Machinegun,
        damage: 10,
        ammo: 500,
        max_ammo: 500,
        cooldown_secs: 0.1,
        last_fired_tick: 0,
        projectile_speed: 5.0,
        range: 200.0,
    }
}

/// Spawn the fixed island layout.
pub fn spawn_islands(world: &mut World) {
    let islands: [(&str, [f64; 3], f64, Zone, Option<Faction>); 8] = [
        ("main_island", [0.0, 0.0, 0.0], 10.0, Zone::StartingIslands, None),
        ("eastern_isle", [30.0, -5.0, 20.0], 8.0, Zone::StartingIslands, None),
        (
            "northern_peak",
            [-40.0, 10.0, -30.0],
            12.0,
            Zone::StartingIslands,
            Some(Faction::Military),
        ),
        ("sunset_ridge", [50.0, 15.0, -40.0], 7.0, Zone::StartingIslands, None),
        (
            "southern_harbor",
            [-20.0, -8.0, 60.0],
            9.0,
            Zone::StartingIslands,
            Some(Faction::Pirates),
        ),
        (
            "volcano_island",
            [70.0, 20.0, 10.0],
            15.0,
            Zone::VolcanicZone,
            Some(Faction::Pirates),
        ),
        (
            "crystal_valley",
            [-60.0, 5.0, -70.0],
            12.0,
            Zone::CrystalZone,
            Some(Faction::Mercenary),
        ),
        (
            "ancient_ruins",
            [90.0, -10.0, 70.0],
            14.0,
            Zone::AncientZone,
            Some(Faction::Wildlife),
        ),
    ];

    for (name, [x, y, z], size, zone, faction) in islands {
        world.spawn((
            Island {
                name: name.to_string(),
                size,
                zone,
                faction,
            },
            Position(Vec3::new(x, y, z)),
        ));
    }
}

/// Spawn the tutorial checkpoint rings.
pub fn spawn_checkpoints(world: &mut World) {
    let checkpoints = [
        ("checkpoint1", Vec3::new(0.0, 35.0, 40.0)),
        ("checkpoint2", Vec3::new(30.0, 40.0, 60.0)),
        ("checkpoint3", Vec3::new(30.0, 10.0, 20.0)),
    ];
    for (id, position) in checkpoints {
        world.spawn((
            Checkpoint {
                id: id.to_string(),
                radius: 8.0,
                triggered: false,
            },
            Position(position),
        ));
    }
}

/// Spawn one enemy of the given preset. Behavior starts `Patrolling`
/// unless a formation slot is given, and patrol routes are generated
/// around the spawn position.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    preset: EnemyPreset,
    position: Vec3,
    id: EnemyId,
    formation: Option<(EnemyId, Vec3)>,
) -> hecs::Entity {
    let profile = get_profile(preset);
    let route = patrol::build_route(
        profile.patrol.pattern,
        position,
        profile.patrol.radius,
        rng,
    );

    let (behavior, formation_leader, formation_offset) = match formation {
        Some((leader, offset)) => (BehaviorState::Formation, Some(leader), offset),
        None => (BehaviorState::Patrolling, None, Vec3::ZERO),
    };

    world.spawn((
        EnemyAgent {
            id,
            preset,
            faction: profile.faction,
            model: profile.model,
            behavior,
            alert: 0.0,
            patrol_route: route,
            patrol_index: 0,
            attack_offset: Vec3::ZERO,
            offset_refresh_tick: 0,
            retreat_target: None,
            formation_leader,
            formation_offset,
        },
        Position(position),
        Velocity(Vec3::ZERO),
        Attitude(Orientation::default()),
        Health {
            hp: profile.max_health,
            max: profile.max_health,
        },
        Weapon {
            kind: profile.weapon.kind,
            damage: profile.weapon.damage,
            ammo: u32::MAX,
            max_ammo: u32::MAX,
            cooldown_secs: profile.weapon.cooldown_secs,
            last_fired_tick: 0,
            projectile_speed: profile.weapon.projectile_speed,
            range: profile.weapon.range,
        },
    ))
}

/// Spawn a projectile already moving at full speed.
pub fn spawn_projectile(
    world: &mut World,
    owner: ProjectileOwner,
    kind: WeaponKind,
    damage: u32,
    position: Vec3,
    velocity: Vec3,
    range: f64,
) -> hecs::Entity {
    let speed = velocity.length().max(1e-6);
    // Velocities are units per tick; the projectile expires once it
    // has covered its weapon range.
    let lifetime_ticks = range / speed;
    world.spawn((
        Projectile {
            owner,
            kind,
            damage,
            lifetime_secs: lifetime_ticks * DT,
            prev_position: position,
        },
        Position(position),
        Velocity(velocity),
    ))
}

/// Spawn an explosion effect.
pub fn spawn_explosion(world: &mut World, position: Vec3, scale: f64) -> hecs::Entity {
    world.spawn((
        Explosion {
            scale,
            lifetime_secs: EXPLOSION_LIFETIME_SECS,
        },
        Position(position),
    ))
}

/// Spawn a pickup at a position.
pub fn spawn_pickup(world: &mut World, kind: PickupKind, position: Vec3) -> hecs::Entity {
    world.spawn((Pickup { kind, radius: 3.0 }, Position(position)))
}

/// Slot offsets for spawned formations, relative to the leader.
pub fn formation_offset(slot: FormationSlot) -> Vec3 {
    match slot {
        FormationSlot::Lead => Vec3::ZERO,
        FormationSlot::Right => Vec3::new(20.0, 0.0, -5.0),
        FormationSlot::Left => Vec3::new(-20.0, 0.0, -5.0),
        FormationSlot::RightRear => Vec3::new(15.0, 5.0, -20.0),
        FormationSlot::LeftRear => Vec3::new(-15.0, 5.0, -20.0),
    }
}

/// Follower slots in fill order.
pub const FOLLOWER_SLOTS: [FormationSlot; 4] = [
    FormationSlot::Right,
    FormationSlot::Left,
    FormationSlot::RightRear,
    FormationSlot::LeftRear,
];

/// Roll a random pickup drop position near a destroyed enemy.
pub fn roll_pickup_drop(rng: &mut ChaCha8Rng, position: Vec3) -> Option<(PickupKind, Vec3)> {
    // 30% drop chance, uniform over the pickup kinds.
    if rng.gen::<f64>() >= 0.3 {
        return None;
    }
    let kind = match rng.gen_range(0..5) {
        0 => PickupKind::Health,
        1 => PickupKind::Fuel,
        2 => PickupKind::Ammo,
        3 => PickupKind::Credits,
        _ => PickupKind::Experience,
    };
    let offset = Vec3::new(
        (rng.gen::<f64>() - 0.5) * 4.0,
        (rng.gen::<f64>() - 0.5) * 2.0,
        (rng.gen::<f64>() - 0.5) * 4.0,
    );
    Some((kind, position.add(&offset)))
}
