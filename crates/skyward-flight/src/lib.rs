//! Pure flight math: the aerodynamic force model, the collision damage
//! resolver, and aircraft performance profiles.
//!
//! No ECS dependency; everything operates on plain data, with any
//! randomness injected by the caller.

pub mod aero;
pub mod damage;
pub mod profiles;
