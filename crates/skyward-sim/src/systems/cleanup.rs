//! End-of-tick cleanup.
//!
//! Ages projectiles and explosions, queues expired ones, then drains
//! the shared despawn buffer. Despawning only happens here, after
//! every other system has released its borrows.

use hecs::{Entity, World};

use skyward_core::components::{Explosion, Projectile};
use skyward_core::constants::DT;

/// Age timed entities and drain the despawn buffer.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.lifetime_secs -= DT;
        if projectile.lifetime_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.lifetime_secs -= DT;
        if explosion.lifetime_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        // A hit projectile may also have expired this tick; the second
        // despawn is a harmless no-op.
        let _ = world.despawn(entity);
    }
}
