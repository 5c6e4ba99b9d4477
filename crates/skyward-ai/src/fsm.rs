//! Enemy behavior finite state machine.
//!
//! Pure functions that compute behavior transitions, alert tracking,
//! movement targets, and the fire decision for enemy aircraft.
//! No ECS dependency; operates on plain data.

use skyward_core::constants::*;
use skyward_core::enums::BehaviorState;
use skyward_core::types::Vec3;

use crate::profiles::EnemyProfile;

/// Leader pose for formation followers, re-resolved by the caller
/// each tick. `None` means the leader no longer exists.
#[derive(Debug, Clone, Copy)]
pub struct LeaderPose {
    pub position: Vec3,
    pub yaw: f64,
}

/// Input to the behavior FSM for a single enemy.
pub struct EnemyContext<'a> {
    pub behavior: BehaviorState,
    pub alert: f64,
    pub health: f64,
    pub position: Vec3,
    pub forward: Vec3,
    pub player_position: Vec3,
    pub distance_to_player: f64,
    /// Whether the weapon cooldown has elapsed.
    pub cooldown_ready: bool,
    /// Current attack-position jitter offset.
    pub attack_offset: Vec3,
    pub patrol_route: &'a [Vec3],
    pub patrol_index: usize,
    /// Current retreat destination, if one was already chosen.
    pub retreat_target: Option<Vec3>,
    /// Nearest friendly island position (altitude-adjusted), if any.
    pub friendly_island: Option<Vec3>,
    pub leader: Option<LeaderPose>,
    pub formation_offset: Vec3,
}

/// Output from the behavior FSM.
#[derive(Debug, Clone, Copy)]
pub struct AiUpdate {
    pub new_behavior: BehaviorState,
    pub new_alert: f64,
    /// Where steering should head this tick.
    pub move_target: Vec3,
    /// Whether to fire the weapon this tick.
    pub fire: bool,
    /// Whether the current patrol waypoint was reached.
    pub advance_waypoint: bool,
    /// Newly chosen retreat destination (when entering a retreat).
    pub new_retreat_target: Option<Vec3>,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext, profile: &EnemyProfile) -> AiUpdate {
    // Alert tracks player proximity in every state.
    let new_alert = if ctx.distance_to_player < profile.detection_range {
        (ctx.alert + ALERT_GAIN).min(1.0)
    } else {
        (ctx.alert - ALERT_DECAY).max(0.0)
    };

    // Damage takes priority over everything else.
    if ctx.health < RETREAT_HEALTH && ctx.behavior != BehaviorState::Retreating {
        let target = retreat_destination(ctx);
        return AiUpdate {
            new_behavior: BehaviorState::Retreating,
            new_alert,
            move_target: target,
            fire: false,
            advance_waypoint: false,
            new_retreat_target: Some(target),
        };
    }

    match ctx.behavior {
        BehaviorState::Idle => evaluate_idle(ctx, profile, new_alert),
        BehaviorState::Patrolling => evaluate_patrolling(ctx, profile, new_alert),
        BehaviorState::Pursuing => evaluate_pursuing(ctx, profile, new_alert),
        BehaviorState::Attacking => evaluate_attacking(ctx, profile, new_alert),
        BehaviorState::Retreating => evaluate_retreating(ctx, new_alert),
        BehaviorState::Formation => evaluate_formation(ctx, profile, new_alert),
    }
}

fn evaluate_idle(ctx: &EnemyContext, profile: &EnemyProfile, new_alert: f64) -> AiUpdate {
    if ctx.distance_to_player < profile.detection_range {
        return AiUpdate {
            new_behavior: BehaviorState::Patrolling,
            new_alert,
            move_target: patrol_target(ctx),
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }
    AiUpdate {
        new_behavior: BehaviorState::Idle,
        new_alert,
        move_target: ctx.position,
        fire: false,
        advance_waypoint: false,
        new_retreat_target: None,
    }
}

fn evaluate_patrolling(ctx: &EnemyContext, profile: &EnemyProfile, new_alert: f64) -> AiUpdate {
    if new_alert > ALERT_PURSUE_THRESHOLD {
        return AiUpdate {
            new_behavior: BehaviorState::Pursuing,
            new_alert,
            move_target: ctx.player_position,
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    let target = patrol_target(ctx);
    let advance = ctx.position.distance_to(&target) < PATROL_WAYPOINT_RADIUS;
    AiUpdate {
        new_behavior: BehaviorState::Patrolling,
        new_alert,
        move_target: target,
        fire: false,
        advance_waypoint: advance,
        new_retreat_target: None,
    }
}

fn evaluate_pursuing(ctx: &EnemyContext, profile: &EnemyProfile, new_alert: f64) -> AiUpdate {
    // Give up: back to patrol at exactly the half-alert mark, so a
    // returning player is re-acquired faster than a fresh contact.
    if ctx.distance_to_player > profile.give_up_range {
        return AiUpdate {
            new_behavior: BehaviorState::Patrolling,
            new_alert: ALERT_GIVE_UP_RESET,
            move_target: patrol_target(ctx),
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    if ctx.distance_to_player < profile.attack_range {
        return AiUpdate {
            new_behavior: BehaviorState::Attacking,
            new_alert,
            move_target: ctx.player_position.add(&ctx.attack_offset),
            fire: fire_gate(ctx, profile),
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    AiUpdate {
        new_behavior: BehaviorState::Pursuing,
        new_alert,
        move_target: ctx.player_position,
        fire: false,
        advance_waypoint: false,
        new_retreat_target: None,
    }
}

fn evaluate_attacking(ctx: &EnemyContext, profile: &EnemyProfile, new_alert: f64) -> AiUpdate {
    if ctx.distance_to_player > profile.attack_range * ATTACK_BREAK_FACTOR {
        return AiUpdate {
            new_behavior: BehaviorState::Pursuing,
            new_alert,
            move_target: ctx.player_position,
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    AiUpdate {
        new_behavior: BehaviorState::Attacking,
        new_alert,
        move_target: ctx.player_position.add(&ctx.attack_offset),
        fire: fire_gate(ctx, profile),
        advance_waypoint: false,
        new_retreat_target: None,
    }
}

fn evaluate_retreating(ctx: &EnemyContext, new_alert: f64) -> AiUpdate {
    if ctx.health > RECOVER_HEALTH && ctx.distance_to_player > RECOVER_DISTANCE {
        return AiUpdate {
            new_behavior: BehaviorState::Patrolling,
            new_alert,
            move_target: patrol_target(ctx),
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    let target = ctx
        .retreat_target
        .unwrap_or_else(|| retreat_destination(ctx));
    AiUpdate {
        new_behavior: BehaviorState::Retreating,
        new_alert,
        move_target: target,
        fire: false,
        advance_waypoint: false,
        new_retreat_target: if ctx.retreat_target.is_none() {
            Some(target)
        } else {
            None
        },
    }
}

fn evaluate_formation(ctx: &EnemyContext, profile: &EnemyProfile, new_alert: f64) -> AiUpdate {
    // Followers break off like patrollers once fully alerted.
    if new_alert > ALERT_PURSUE_THRESHOLD && ctx.distance_to_player < profile.detection_range {
        return AiUpdate {
            new_behavior: BehaviorState::Pursuing,
            new_alert,
            move_target: ctx.player_position,
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        };
    }

    match ctx.leader {
        Some(leader) => AiUpdate {
            new_behavior: BehaviorState::Formation,
            new_alert,
            move_target: leader
                .position
                .add(&rotate_yaw(ctx.formation_offset, leader.yaw)),
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        },
        // Leader destroyed or despawned: fall back to patrolling.
        None => AiUpdate {
            new_behavior: BehaviorState::Patrolling,
            new_alert,
            move_target: patrol_target(ctx),
            fire: false,
            advance_waypoint: false,
            new_retreat_target: None,
        },
    }
}

/// All three fire conditions must hold: rough nose alignment with the
/// player, weapon range, and an elapsed cooldown.
fn fire_gate(ctx: &EnemyContext, profile: &EnemyProfile) -> bool {
    let to_player = ctx.position.direction_to(&ctx.player_position);
    ctx.forward.dot(&to_player) > FIRE_ALIGNMENT
        && ctx.distance_to_player < profile.weapon.range
        && ctx.cooldown_ready
}

fn patrol_target(ctx: &EnemyContext) -> Vec3 {
    if ctx.patrol_route.is_empty() {
        return ctx.position;
    }
    ctx.patrol_route[ctx.patrol_index % ctx.patrol_route.len()]
}

/// Retreat toward the nearest friendly island, or directly away from
/// the player when no friendly island exists.
fn retreat_destination(ctx: &EnemyContext) -> Vec3 {
    if let Some(island) = ctx.friendly_island {
        return island;
    }
    let away = ctx.player_position.direction_to(&ctx.position);
    ctx.position.add(&away.scale(RETREAT_FALLBACK_DISTANCE))
}

/// Rotate a formation offset into the leader's heading frame.
fn rotate_yaw(offset: Vec3, yaw: f64) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(
        offset.x * cos + offset.z * sin,
        offset.y,
        -offset.x * sin + offset.z * cos,
    )
}
