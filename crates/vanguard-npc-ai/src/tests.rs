#[cfg(test)]
mod tests {
    use vanguard_core::constants::*;
    use vanguard_core::enums::{AiBehavior, Faction};
    use vanguard_core::types::Position;

    use crate::fsm::{evaluate, flee_point, patrol_target, select_behavior, NpcContext};

    fn make_context(
        faction: Faction,
        hull_fraction: f64,
        player_distance: f64,
        route: &[Position],
    ) -> NpcContext<'_> {
        // NPC at origin, player along +x
        NpcContext {
            faction,
            behavior: AiBehavior::Patrol,
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            hull_fraction,
            player_position: Some(Position::new(player_distance, 0.0)),
            patrol_route: route,
            patrol_index: 0,
        }
    }

    #[test]
    fn test_friendly_escorts_when_far() {
        assert_eq!(select_behavior(Faction::Friendly, 1.0, 501.0), AiBehavior::Approach);
        assert_eq!(select_behavior(Faction::Friendly, 1.0, 500.0), AiBehavior::Patrol);
        assert_eq!(select_behavior(Faction::Friendly, 1.0, 100.0), AiBehavior::Patrol);
    }

    #[test]
    fn test_neutral_always_patrols() {
        for d in [0.0, 300.0, 900.0, 5000.0] {
            assert_eq!(select_behavior(Faction::Neutral, 0.1, d), AiBehavior::Patrol);
        }
    }

    #[test]
    fn test_hostile_range_bands() {
        assert_eq!(select_behavior(Faction::Hostile, 1.0, 799.0), AiBehavior::Attack);
        assert_eq!(select_behavior(Faction::Hostile, 1.0, 800.0), AiBehavior::Approach);
        assert_eq!(select_behavior(Faction::Hostile, 1.0, 1499.0), AiBehavior::Approach);
        assert_eq!(select_behavior(Faction::Hostile, 1.0, 1500.0), AiBehavior::Patrol);
    }

    #[test]
    fn test_hostile_flee_overrides_everything() {
        for d in [10.0, 700.0, 1200.0, 10_000.0] {
            assert_eq!(select_behavior(Faction::Hostile, 0.29, d), AiBehavior::Flee);
        }
        // Exactly at the threshold does not flee
        assert_eq!(select_behavior(Faction::Hostile, 0.3, 10.0), AiBehavior::Attack);
    }

    #[test]
    fn test_attack_targets_player_at_full_speed() {
        let ctx = make_context(Faction::Hostile, 1.0, 600.0, &[]);
        let d = evaluate(&ctx);
        assert_eq!(d.behavior, AiBehavior::Attack);
        assert!(d.behavior_changed);
        assert_eq!(d.move_target, Some(Position::new(600.0, 0.0)));
        assert_eq!(d.speed_fraction, ATTACK_SPEED_FRACTION);
        assert!(!d.in_firing_range, "600 is outside phaser range");
    }

    #[test]
    fn test_attack_inside_phaser_range_wants_to_fire() {
        let ctx = make_context(Faction::Hostile, 1.0, 350.0, &[]);
        let d = evaluate(&ctx);
        assert!(d.in_firing_range);
    }

    #[test]
    fn test_approach_speed() {
        let ctx = make_context(Faction::Hostile, 1.0, 1000.0, &[]);
        let d = evaluate(&ctx);
        assert_eq!(d.behavior, AiBehavior::Approach);
        assert_eq!(d.speed_fraction, APPROACH_SPEED_FRACTION);
        assert!(!d.in_firing_range);
    }

    #[test]
    fn test_flee_point_is_away_from_player() {
        let ctx = make_context(Faction::Hostile, 0.1, 200.0, &[]);
        let d = evaluate(&ctx);
        assert_eq!(d.behavior, AiBehavior::Flee);
        let target = d.move_target.unwrap();
        assert!((target.x + FLEE_DISTANCE).abs() < 1e-9);
        assert!(target.y.abs() < 1e-9);
        assert_eq!(d.speed_fraction, FLEE_SPEED_FRACTION);
        assert!(!d.in_firing_range, "fleeing ships hold fire");
    }

    #[test]
    fn test_flee_point_when_on_top_of_player_follows_heading() {
        let p = Position::new(10.0, 10.0);
        let target = flee_point(p, p, 90.0);
        assert!((target.x - 10.0).abs() < 1e-9);
        assert!((target.y - (10.0 + FLEE_DISTANCE)).abs() < 1e-9);
    }

    #[test]
    fn test_patrol_with_empty_route_holds_position() {
        let ctx = make_context(Faction::Neutral, 1.0, 100.0, &[]);
        let d = evaluate(&ctx);
        assert_eq!(d.behavior, AiBehavior::Patrol);
        assert_eq!(d.move_target, None);
        assert_eq!(d.speed_fraction, 0.0);
    }

    #[test]
    fn test_patrol_advances_and_wraps() {
        let route = [Position::new(0.0, 0.0), Position::new(100.0, 0.0)];
        // At point 0, within arrival range: advance to 1
        let (target, index) = patrol_target(Position::new(5.0, 0.0), &route, 0);
        assert_eq!(index, 1);
        assert_eq!(target, Some(route[1]));
        // At point 1: wrap to 0
        let (target, index) = patrol_target(Position::new(99.0, 0.0), &route, 1);
        assert_eq!(index, 0);
        assert_eq!(target, Some(route[0]));
        // Far from current point: keep it
        let (_, index) = patrol_target(Position::new(50.0, 0.0), &route, 1);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_patrol_speed_fraction() {
        let route = [Position::new(500.0, 500.0)];
        let ctx = make_context(Faction::Neutral, 1.0, 100.0, &route);
        let d = evaluate(&ctx);
        assert_eq!(d.speed_fraction, PATROL_SPEED_FRACTION);
        assert!(!d.behavior_changed);
    }

    #[test]
    fn test_no_player_falls_back_to_patrol() {
        let route = [Position::new(500.0, 500.0)];
        let mut ctx = make_context(Faction::Hostile, 0.1, 0.0, &route);
        ctx.player_position = None;
        let d = evaluate(&ctx);
        assert_eq!(d.behavior, AiBehavior::Patrol);
        assert_eq!(d.move_target, Some(route[0]));
    }
}
