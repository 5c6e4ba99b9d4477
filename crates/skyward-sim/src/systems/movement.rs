//! Kinematic integration system.
//!
//! Updates Position from Velocity and Attitude from AngularVelocity
//! each tick. Projectiles additionally record their previous position
//! for swept collision tests.

use hecs::World;

use skyward_core::components::{AngularVelocity, Attitude, Position, Projectile, Velocity};
use skyward_core::constants::{DT, WORLD_SIZE};

/// Integrate all moving entities.
pub fn run(world: &mut World) {
    // Projectiles remember where they were for the swept hit test.
    for (_entity, (projectile, pos)) in world.query_mut::<(&mut Projectile, &Position)>() {
        projectile.prev_position = pos.0;
    }

    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0.x += vel.0.x;
        pos.0.y += vel.0.y;
        pos.0.z += vel.0.z;
    }

    // Attitude integration for entities steered by torque (the player).
    for (_entity, (attitude, ang_vel)) in world.query_mut::<(&mut Attitude, &AngularVelocity)>() {
        attitude.0.pitch += ang_vel.pitch * DT;
        attitude.0.yaw += ang_vel.yaw * DT;
        attitude.0.roll += ang_vel.roll * DT;
    }

    // Keep everything inside the world bounds.
    for (_entity, pos) in world.query_mut::<&mut Position>() {
        pos.0.x = pos.0.x.clamp(-WORLD_SIZE, WORLD_SIZE);
        pos.0.z = pos.0.z.clamp(-WORLD_SIZE, WORLD_SIZE);
    }
}
