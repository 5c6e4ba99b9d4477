//! Enemy behavior logic.
//!
//! Pure functions that compute behavior-state transitions, patrol
//! routes, and steering adjustments for enemy aircraft. No ECS
//! dependency; operates on plain data.

pub mod fsm;
pub mod patrol;
pub mod profiles;
pub mod steering;

#[cfg(test)]
mod tests;
