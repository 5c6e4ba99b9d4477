#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyward_core::constants::*;
    use skyward_core::enums::{BehaviorState, EnemyPreset, PatrolPattern};
    use skyward_core::types::{Orientation, Vec3};

    use crate::fsm::{evaluate, EnemyContext, LeaderPose};
    use crate::patrol::build_route;
    use crate::profiles::get_profile;
    use crate::steering::{avoidance, speed_factor, steer_velocity, turn_toward, Obstacle};

    /// An enemy at the origin facing +z, with the player straight ahead
    /// at the given distance.
    fn make_context(
        behavior: BehaviorState,
        alert: f64,
        health: f64,
        player_distance: f64,
    ) -> EnemyContext<'static> {
        EnemyContext {
            behavior,
            alert,
            health,
            position: Vec3::ZERO,
            forward: Vec3::new(0.0, 0.0, 1.0),
            player_position: Vec3::new(0.0, 0.0, player_distance),
            distance_to_player: player_distance,
            cooldown_ready: true,
            attack_offset: Vec3::ZERO,
            patrol_route: WAYPOINTS,
            patrol_index: 0,
            retreat_target: None,
            friendly_island: None,
            leader: None,
            formation_offset: Vec3::new(20.0, 0.0, -5.0),
        }
    }

    static WAYPOINTS: &[Vec3] = &[
        Vec3 {
            x: 50.0,
            y: 40.0,
            z: 0.0,
        },
        Vec3 {
            x: -50.0,
            y: 40.0,
            z: 0.0,
        },
    ];

    #[test]
    fn test_idle_wakes_when_player_near() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Idle,
            0.0,
            80.0,
            profile.detection_range - 1.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Patrolling);
    }

    #[test]
    fn test_idle_stays_idle_when_player_far() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Idle,
            0.0,
            80.0,
            profile.detection_range + 50.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Idle);
    }

    #[test]
    fn test_alert_ramps_up_in_detection_range() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Patrolling,
            0.5,
            80.0,
            profile.detection_range - 10.0,
        );
        let update = evaluate(&ctx, &profile);
        assert!((update.new_alert - (0.5 + ALERT_GAIN)).abs() < 1e-12);
    }

    #[test]
    fn test_alert_decays_outside_detection_range() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Patrolling,
            0.5,
            80.0,
            profile.detection_range + 100.0,
        );
        let update = evaluate(&ctx, &profile);
        assert!((update.new_alert - (0.5 - ALERT_DECAY)).abs() < 1e-12);
        // Never below zero.
        let ctx_zero = make_context(
            BehaviorState::Patrolling,
            0.0,
            80.0,
            profile.detection_range + 100.0,
        );
        assert_eq!(evaluate(&ctx_zero, &profile).new_alert, 0.0);
    }

    #[test]
    fn test_patrol_to_pursue_above_threshold() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Patrolling,
            0.85,
            80.0,
            profile.detection_range - 10.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Pursuing);
    }

    #[test]
    fn test_pursue_gives_up_and_resets_alert_to_half() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Pursuing,
            1.0,
            80.0,
            profile.give_up_range + 1.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Patrolling);
        // Exact half-alert so re-engagement is faster than cold detection.
        assert_eq!(update.new_alert, ALERT_GIVE_UP_RESET);
    }

    #[test]
    fn test_pursue_to_attack_in_range() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Pursuing,
            1.0,
            80.0,
            profile.attack_range - 5.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Attacking);
    }

    #[test]
    fn test_attack_breaks_off_beyond_factor() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            80.0,
            profile.attack_range * ATTACK_BREAK_FACTOR + 1.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Pursuing);
        assert!(!update.fire);
    }

    #[test]
    fn test_fire_gate_requires_alignment_range_and_cooldown() {
        let profile = get_profile(EnemyPreset::PirateFighter);

        // Aligned, in range, cooldown ready: fires.
        let ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            80.0,
            profile.weapon.range - 10.0,
        );
        assert!(evaluate(&ctx, &profile).fire);

        // Cooldown not ready: holds fire.
        let mut ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            80.0,
            profile.weapon.range - 10.0,
        );
        ctx.cooldown_ready = false;
        assert!(!evaluate(&ctx, &profile).fire);

        // Facing away: holds fire.
        let mut ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            80.0,
            profile.weapon.range - 10.0,
        );
        ctx.forward = Vec3::new(0.0, 0.0, -1.0);
        assert!(!evaluate(&ctx, &profile).fire);

        // Beyond weapon range: holds fire.
        let profile_elite = get_profile(EnemyPreset::PirateBomber);
        let ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            120.0,
            profile_elite.weapon.range + 5.0,
        );
        // Still inside attack break distance for the bomber (70 * 1.5).
        assert_eq!(
            evaluate(&ctx, &profile_elite).new_behavior,
            BehaviorState::Attacking
        );
        assert!(!evaluate(&ctx, &profile_elite).fire);
    }

    #[test]
    fn test_low_health_forces_retreat() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            RETREAT_HEALTH - 1.0,
            30.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Retreating);
        assert!(update.new_retreat_target.is_some());
        assert!(!update.fire);
    }

    #[test]
    fn test_retreat_prefers_friendly_island() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let island = Vec3::new(100.0, 60.0, 100.0);
        let mut ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            20.0,
            30.0,
        );
        ctx.friendly_island = Some(island);
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_retreat_target, Some(island));
    }

    #[test]
    fn test_retreat_fallback_flees_player() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Attacking,
            1.0,
            20.0,
            30.0,
        );
        let update = evaluate(&ctx, &profile);
        let target = update.new_retreat_target.unwrap();
        // Player is at +z; the fallback point lies opposite.
        assert!(target.z < 0.0);
        assert!((ctx.position.distance_to(&target) - RETREAT_FALLBACK_DISTANCE).abs() < 1e-6);
    }

    #[test]
    fn test_retreat_recovers_when_healed_and_far() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Retreating,
            0.3,
            RECOVER_HEALTH + 5.0,
            RECOVER_DISTANCE + 10.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Patrolling);
    }

    #[test]
    fn test_retreat_continues_when_player_close() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Retreating,
            0.3,
            RECOVER_HEALTH + 5.0,
            RECOVER_DISTANCE - 50.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Retreating);
    }

    #[test]
    fn test_formation_target_rotates_with_leader() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let mut ctx = make_context(
            BehaviorState::Formation,
            0.0,
            80.0,
            500.0,
        );
        ctx.leader = Some(LeaderPose {
            position: Vec3::new(10.0, 50.0, 10.0),
            yaw: std::f64::consts::FRAC_PI_2,
        });
        // Offset (20, 0, -5) under a quarter yaw turn lands at (-5, 0, -20)
        // relative to the leader.
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Formation);
        assert!((update.move_target.x - 5.0).abs() < 1e-9);
        assert!((update.move_target.y - 50.0).abs() < 1e-9);
        assert!((update.move_target.z - (10.0 - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_formation_without_leader_falls_back_to_patrol() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let ctx = make_context(
            BehaviorState::Formation,
            0.0,
            80.0,
            500.0,
        );
        let update = evaluate(&ctx, &profile);
        assert_eq!(update.new_behavior, BehaviorState::Patrolling);
    }

    #[test]
    fn test_patrol_waypoint_advance_within_radius() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let mut ctx = make_context(
            BehaviorState::Patrolling,
            0.0,
            80.0,
            500.0,
        );
        ctx.position = Vec3::new(45.0, 40.0, 0.0); // 5 from waypoint 0
        let update = evaluate(&ctx, &profile);
        assert!(update.advance_waypoint);

        ctx.position = Vec3::new(0.0, 40.0, 0.0); // 50 from waypoint 0
        let update = evaluate(&ctx, &profile);
        assert!(!update.advance_waypoint);
    }

    // ---- Patrol routes ----

    #[test]
    fn test_patrol_route_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let center = Vec3::new(0.0, 60.0, 0.0);
        assert_eq!(
            build_route(PatrolPattern::Circle, center, 80.0, &mut rng).len(),
            8
        );
        assert_eq!(
            build_route(PatrolPattern::FigureEight, center, 80.0, &mut rng).len(),
            16
        );
        assert_eq!(
            build_route(PatrolPattern::Linear, center, 80.0, &mut rng).len(),
            2
        );
        assert_eq!(
            build_route(PatrolPattern::Random, center, 80.0, &mut rng).len(),
            5
        );
    }

    #[test]
    fn test_circle_route_on_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let center = Vec3::new(10.0, 60.0, -20.0);
        for point in build_route(PatrolPattern::Circle, center, 80.0, &mut rng) {
            assert!((point.distance_to(&center) - 80.0).abs() < 1e-9);
            assert_eq!(point.y, 60.0);
        }
    }

    #[test]
    fn test_random_route_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let center = Vec3::new(0.0, 60.0, 0.0);
        for point in build_route(PatrolPattern::Random, center, 150.0, &mut rng) {
            assert!(point.x.abs() <= 150.0);
            assert!(point.z.abs() <= 150.0);
            assert!((point.y - 60.0).abs() <= 10.0);
        }
    }

    // ---- Steering ----

    #[test]
    fn test_avoidance_pushes_away_from_island() {
        let island = Obstacle {
            position: Vec3::new(0.0, 50.0, 10.0),
            size: 10.0,
        };
        let push = avoidance(Vec3::new(0.0, 50.0, 0.0), &[island], &[]);
        assert!(push.z < 0.0, "push should point away from the island");
    }

    #[test]
    fn test_avoidance_ignores_distant_island() {
        let island = Obstacle {
            position: Vec3::new(0.0, 50.0, 100.0),
            size: 10.0,
        };
        let push = avoidance(Vec3::new(0.0, 50.0, 0.0), &[island], &[]);
        assert_eq!(push, Vec3::ZERO);
    }

    #[test]
    fn test_avoidance_altitude_band() {
        let low = avoidance(Vec3::new(0.0, 10.0, 0.0), &[], &[]);
        assert!((low.y - (STEER_FLOOR - 10.0) * STEER_ALTITUDE_PUSH).abs() < 1e-12);

        let high = avoidance(Vec3::new(0.0, 250.0, 0.0), &[], &[]);
        assert!((high.y - -((250.0 - STEER_CEILING) * STEER_ALTITUDE_PUSH)).abs() < 1e-12);

        let mid = avoidance(Vec3::new(0.0, 100.0, 0.0), &[], &[]);
        assert_eq!(mid.y, 0.0);
    }

    #[test]
    fn test_speed_factors_per_behavior() {
        assert_eq!(speed_factor(BehaviorState::Pursuing), SPEED_FACTOR_PURSUE);
        assert_eq!(speed_factor(BehaviorState::Retreating), SPEED_FACTOR_RETREAT);
        assert_eq!(speed_factor(BehaviorState::Attacking), SPEED_FACTOR_ATTACK);
        assert_eq!(speed_factor(BehaviorState::Patrolling), 1.0);
    }

    #[test]
    fn test_steer_velocity_converges_toward_target() {
        let profile = get_profile(EnemyPreset::PirateFighter);
        let mut velocity = Vec3::ZERO;
        let position = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.0, 100.0);
        for _ in 0..50 {
            velocity = steer_velocity(
                velocity,
                position,
                target,
                Vec3::ZERO,
                BehaviorState::Pursuing,
                profile.max_speed,
                0.98,
            );
        }
        // Converges on max_speed * pursue factor along +z.
        assert!(velocity.z > profile.max_speed);
        assert!(velocity.z <= profile.max_speed * SPEED_FACTOR_PURSUE + 1e-9);
        assert!(velocity.x.abs() < 1e-9);
    }

    #[test]
    fn test_turn_toward_banks_into_turn() {
        let velocity = Vec3::new(0.5, 0.0, 0.5);
        let mut attitude = Orientation::default();
        for _ in 0..200 {
            attitude = turn_toward(attitude, velocity, 0.06);
        }
        // Heading settles on the velocity direction, banked right.
        assert!((attitude.yaw - std::f64::consts::FRAC_PI_4).abs() < 0.01);
        assert!(attitude.roll < 0.0);
    }

    #[test]
    fn test_turn_toward_zero_velocity_is_identity() {
        let attitude = Orientation::new(0.1, 0.2, 0.3);
        let same = turn_toward(attitude, Vec3::ZERO, 0.06);
        assert_eq!(same, attitude);
    }
}
