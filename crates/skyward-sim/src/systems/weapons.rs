//! Player weapon system.
//!
//! Fires the selected weapon while the trigger is held, gated by ammo
//! and the weapon cooldown. Fuel state never gates firing; a gliding
//! aircraft can still shoot.

use hecs::World;

use skyward_core::components::{Attitude, Downed, Loadout, PlayerTag, Position};
use skyward_core::constants::TICK_RATE;
use skyward_core::enums::{ProjectileOwner, WeaponKind};
use skyward_core::events::AudioEvent;
use skyward_core::types::Vec3;

use crate::world_setup::spawn_projectile;

struct ShotOrder {
    kind: WeaponKind,
    damage: u32,
    position: Vec3,
    velocity: Vec3,
    range: f64,
}

/// Run one weapons step for the player.
pub fn run(
    world: &mut World,
    events: &mut Vec<AudioEvent>,
    current_tick: u64,
) {
    let mut shot: Option<ShotOrder> = None;

    for (_entity, (_, pos, attitude, loadout)) in world
        .query_mut::<(&PlayerTag, &Position, &Attitude, &mut Loadout)>()
        .without::<&Downed>()
    {
        if !loadout.firing {
            continue;
        }
        let Some(weapon) = loadout.weapons.get_mut(loadout.selected) else {
            continue;
        };
        if weapon.ammo == 0 {
            continue;
        }
        let cooldown_ticks = (weapon.cooldown_secs * TICK_RATE as f64) as u64;
        if weapon.last_fired_tick != 0 && current_tick < weapon.last_fired_tick + cooldown_ticks {
            continue;
        }

        weapon.ammo -= 1;
        weapon.last_fired_tick = current_tick;

        let forward = attitude.0.forward();
        shot = Some(ShotOrder {
            kind: weapon.kind,
            damage: weapon.damage,
            position: pos.0.add(&forward.scale(2.0)),
            velocity: forward.scale(weapon.projectile_speed),
            range: weapon.range,
        });
    }

    if let Some(order) = shot {
        spawn_projectile(
            world,
            ProjectileOwner::Player,
            order.kind,
            order.damage,
            order.position,
            order.velocity,
            order.range,
        );
        events.push(AudioEvent::WeaponFired { kind: order.kind });
    }
}
