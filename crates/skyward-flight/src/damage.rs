//! Collision damage resolver.
//!
//! One shared formula for every physical impact: damage scales with
//! impact speed and a per-surface multiplier, armor upgrades shave a
//! fixed fraction per level, and any registered impact deals at least 1.

use skyward_core::constants::*;

/// What an aircraft collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactSurface {
    Island,
    EnemyAircraft,
    PlayerAircraft,
    Projectile,
    Other,
}

impl ImpactSurface {
    fn multiplier(self) -> f64 {
        match self {
            ImpactSurface::Island => DAMAGE_MULT_ISLAND,
            ImpactSurface::EnemyAircraft => DAMAGE_MULT_ENEMY,
            ImpactSurface::PlayerAircraft => DAMAGE_MULT_PLAYER,
            ImpactSurface::Projectile => DAMAGE_MULT_PROJECTILE,
            ImpactSurface::Other => 1.0,
        }
    }
}

/// Damage dealt by an impact at `speed` against `surface`, reduced by
/// the victim's armor level (1 = stock, no reduction).
pub fn collision_damage(speed: f64, surface: ImpactSurface, armor_level: u32) -> u32 {
    let raw = speed.abs() * surface.multiplier() * armor_factor(armor_level);
    (raw.floor() as i64).max(1) as u32
}

/// Damage the player takes from an enemy projectile carrying `damage`,
/// after armor reduction. Unlike impacts there is no minimum-1 floor.
pub fn projectile_damage_taken(damage: u32, armor_level: u32) -> u32 {
    (damage as f64 * armor_factor(armor_level)).floor().max(0.0) as u32
}

fn armor_factor(armor_level: u32) -> f64 {
    (1.0 - ARMOR_REDUCTION_PER_LEVEL * (armor_level.saturating_sub(1)) as f64).max(0.0)
}

/// Explosion scale for an impact of the given damage.
pub fn impact_explosion_scale(damage: u32) -> f64 {
    damage as f64 / EXPLOSION_DAMAGE_SCALE_DIVISOR
}
