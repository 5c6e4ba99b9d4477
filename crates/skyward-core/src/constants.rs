//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Half-extent of the playable area on each horizontal axis.
pub const WORLD_SIZE: f64 = 1000.0;

/// Minimum safe altitude. Below this the low-altitude warning fires.
pub const MIN_HEIGHT: f64 = 20.0;

/// Altitude margin above MIN_HEIGHT at which the warning already shows.
pub const LOW_ALTITUDE_MARGIN: f64 = 20.0;

/// Altitude the player respawns at after destruction.
pub const RESPAWN_HEIGHT: f64 = 30.0;

/// Gravitational acceleration (m/s², downward).
pub const GRAVITY: f64 = -9.81;

// --- Aerodynamics defaults ---

/// Default drag coefficient (fraction of velocity retained per step).
pub const AERO_DRAG: f64 = 0.98;

/// Default lift factor.
pub const AERO_LIFT: f64 = 0.03;

/// Default weight force magnitude.
pub const AERO_WEIGHT: f64 = 9.81;

/// Speed below which a stall can occur.
pub const AERO_STALL_SPEED: f64 = 0.1;

/// Pitch angle beyond which a stall can occur (radians).
pub const AERO_STALL_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Angle of attack giving maximum lift (radians).
pub const AERO_OPTIMAL_ANGLE: f64 = std::f64::consts::PI / 12.0;

// --- Player controller ---

/// Fuel burned per tick at full throttle with a level-1 engine.
pub const FUEL_BURN_RATE: f64 = 0.002;

/// Fraction of the speed excess over the airframe limit shed per tick.
/// Speed above the limit decays instead of being capped outright.
pub const OVERSPEED_BLEED: f64 = 0.5;

/// Duration of the stall recovery-assist window (seconds).
pub const STALL_ASSIST_SECS: f64 = 2.0;

/// Delay between player destruction and respawn (seconds).
pub const RESPAWN_DELAY_SECS: f64 = 2.0;

/// Maximum g-force reported to the snapshot.
pub const MAX_G_FORCE: f64 = 10.0;

/// Per-tick chance of the out-of-fuel reminder while gliding.
pub const FUEL_WARNING_CHANCE: f64 = 0.01;

// --- Enemy AI ---

/// Alert gain per tick while the player is inside detection range.
pub const ALERT_GAIN: f64 = 0.01;

/// Alert decay per tick while the player is outside detection range.
pub const ALERT_DECAY: f64 = 0.005;

/// Alert level above which an enemy starts pursuing.
pub const ALERT_PURSUE_THRESHOLD: f64 = 0.8;

/// Alert level an enemy resets to when it gives up a pursuit.
pub const ALERT_GIVE_UP_RESET: f64 = 0.5;

/// Attacking enemies fall back to pursuit beyond this multiple of attack range.
pub const ATTACK_BREAK_FACTOR: f64 = 1.5;

/// Seconds between attack-offset jitter refreshes.
pub const ATTACK_OFFSET_REFRESH_SECS: f64 = 2.0;

/// Alignment (forward · to-player) required to fire.
pub const FIRE_ALIGNMENT: f64 = 0.7;

/// Health below which an enemy retreats.
pub const RETREAT_HEALTH: f64 = 30.0;

/// Health above which a retreating enemy recovers.
pub const RECOVER_HEALTH: f64 = 40.0;

/// Distance from the player required to end a retreat.
pub const RECOVER_DISTANCE: f64 = 150.0;

/// Distance of the fallback retreat point when no friendly island exists.
pub const RETREAT_FALLBACK_DISTANCE: f64 = 300.0;

/// Waypoint reached when within this distance.
pub const PATROL_WAYPOINT_RADIUS: f64 = 10.0;

/// Grace period between enemy destruction and despawn (seconds).
pub const WRECK_GRACE_SECS: f64 = 1.5;

// --- Steering ---

/// Islands repel within this multiple of their size.
pub const AVOID_ISLAND_RANGE_FACTOR: f64 = 4.0;

/// Island repulsion strength multiplier.
pub const AVOID_ISLAND_STRENGTH: f64 = 2.0;

/// Enemies repel each other within this distance.
pub const AVOID_ENEMY_RANGE: f64 = 10.0;

/// Altitude floor for enemy steering.
pub const STEER_FLOOR: f64 = 20.0;

/// Altitude ceiling for enemy steering.
pub const STEER_CEILING: f64 = 200.0;

/// Vertical push strength per unit outside the altitude band.
pub const STEER_ALTITUDE_PUSH: f64 = 0.1;

/// Speed multiplier while pursuing.
pub const SPEED_FACTOR_PURSUE: f64 = 1.2;

/// Speed multiplier while retreating.
pub const SPEED_FACTOR_RETREAT: f64 = 1.5;

/// Speed multiplier while attacking.
pub const SPEED_FACTOR_ATTACK: f64 = 0.8;

// --- Spawner ---

/// Default cap on simultaneously alive enemies.
pub const MAX_ENEMIES: usize = 15;

/// Seconds between spawn attempts.
pub const SPAWN_COOLDOWN_SECS: f64 = 10.0;

/// Base per-attempt spawn chance, scaled by difficulty factor.
pub const SPAWN_BASE_CHANCE: f64 = 0.2;

/// Base formation chance, scaled by difficulty factor.
pub const FORMATION_BASE_CHANCE: f64 = 0.3;

/// Maximum aircraft in one formation.
pub const FORMATION_MAX_SIZE: usize = 5;

/// Inner radius of the spawn annulus around the player.
pub const SPAWN_RADIUS_MIN: f64 = 80.0;

/// Outer radius of the spawn annulus around the player.
pub const SPAWN_RADIUS_MAX: f64 = 150.0;

/// Lowest spawn altitude.
pub const SPAWN_HEIGHT_MIN: f64 = 30.0;

/// Highest spawn altitude.
pub const SPAWN_HEIGHT_MAX: f64 = 120.0;

/// Position attempts before giving up on a spawn.
pub const SPAWN_MAX_ATTEMPTS: u32 = 10;

/// Candidate positions must be this multiple of island size from islands.
pub const SPAWN_ISLAND_CLEARANCE_FACTOR: f64 = 3.0;

/// Candidate positions must be this far from existing enemies.
pub const SPAWN_ENEMY_CLEARANCE: f64 = 30.0;

// --- Damage ---

/// Impact damage multiplier when hitting an island.
pub const DAMAGE_MULT_ISLAND: f64 = 5.0;

/// Impact damage multiplier when hitting an enemy aircraft.
pub const DAMAGE_MULT_ENEMY: f64 = 2.0;

/// Impact damage multiplier when hitting the player aircraft.
pub const DAMAGE_MULT_PLAYER: f64 = 2.0;

/// Impact damage multiplier for projectile strikes.
pub const DAMAGE_MULT_PROJECTILE: f64 = 1.0;

/// Armor damage reduction per upgrade level above 1.
pub const ARMOR_REDUCTION_PER_LEVEL: f64 = 0.15;

// --- Explosions ---

/// Explosion visual lifetime (seconds).
pub const EXPLOSION_LIFETIME_SECS: f64 = 1.0;

/// Explosion scale on aircraft destruction.
pub const EXPLOSION_SCALE_DESTRUCTION: f64 = 3.0;

/// Explosion scale for a projectile hit on an aircraft.
pub const EXPLOSION_SCALE_HIT: f64 = 0.8;

/// Explosion scale for a projectile hit on an island.
pub const EXPLOSION_SCALE_ISLAND_HIT: f64 = 0.5;

/// Muzzle flash scale for enemy weapon fire.
pub const EXPLOSION_SCALE_MUZZLE: f64 = 0.3;

/// Impact-damage to explosion-scale divisor.
pub const EXPLOSION_DAMAGE_SCALE_DIVISOR: f64 = 20.0;

/// Impact damage above which an explosion spawns.
pub const IMPACT_EXPLOSION_THRESHOLD: u32 = 5;

/// Impact damage above which a notification shows.
pub const IMPACT_NOTIFY_THRESHOLD: u32 = 10;

// --- Pickups ---

/// Health restored by a health pickup.
pub const PICKUP_HEALTH: f64 = 25.0;

/// Fuel restored by a fuel pickup.
pub const PICKUP_FUEL: f64 = 30.0;

/// Minimum credits from a credit pickup (plus 0..100 random).
pub const PICKUP_CREDITS_BASE: u32 = 100;

/// Minimum experience from an experience pickup (plus 0..50 random).
pub const PICKUP_EXPERIENCE_BASE: u32 = 50;

// --- World / environment ---

/// Day-night cycle advance per second (cycle ∈ [0,1)).
pub const DAY_NIGHT_RATE: f64 = 0.0001;

/// Weather transition chance per tick during afternoon hours.
pub const WEATHER_CHANCE_AFTERNOON: f64 = 0.0005;

/// Weather transition chance per tick at other times.
pub const WEATHER_CHANCE_DEFAULT: f64 = 0.0001;

/// Per-tick chance of a lightning strike while stormy.
pub const LIGHTNING_CHANCE: f64 = 0.002;

/// Earliest thunder delay after a lightning flash (seconds).
pub const THUNDER_DELAY_MIN_SECS: f64 = 0.5;

/// Latest thunder delay after a lightning flash (seconds).
pub const THUNDER_DELAY_MAX_SECS: f64 = 2.0;

/// Seconds between autosaves.
pub const AUTOSAVE_INTERVAL_SECS: f64 = 300.0;

// --- Progression ---

/// Experience thresholds per level (index 0 = level 1).
pub const LEVEL_THRESHOLDS: [u32; 10] =
    [0, 200, 500, 1000, 2000, 3500, 5500, 8000, 12000, 18000];

/// Rank titles per level (index 0 = level 1).
pub const LEVEL_RANKS: [&str; 10] = [
    "Rookie Pilot",
    "Cadet Flyer",
    "Sky Apprentice",
    "Cloud Runner",
    "Wind Chaser",
    "Storm Rider",
    "Ace Pilot",
    "Sky Captain",
    "Legendary Aviator",
    "Skybound Legend",
];

/// Experience awarded for triggering a training checkpoint.
pub const CHECKPOINT_EXPERIENCE: u32 = 25;

/// Credits-fraction penalty on player destruction.
pub const DEATH_PENALTY_FRACTION: f64 = 0.1;

/// Cap on the destruction credit penalty.
pub const DEATH_PENALTY_CAP: u32 = 100;

/// Credits above which the destruction penalty applies.
pub const DEATH_PENALTY_FLOOR: u32 = 100;
