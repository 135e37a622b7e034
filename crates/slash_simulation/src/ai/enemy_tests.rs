//! Tests for enemy FSM operations (без ECS World).

#[cfg(test)]
mod tests {
    use super::super::components::{EnemyBrain, EnemyConfig, EnemyState};
    use super::super::enemy::{CombatCheck, Enemy};
    use crate::components::{MovementCommand, MovementSpeed};
    use crate::hud::HealthBar;
    use crate::scheduler::{ScheduledTask, Scheduler};
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Владелец компонентов одного врага для тестов
    struct Fixture {
        brain: EnemyBrain,
        config: EnemyConfig,
        command: MovementCommand,
        speed: MovementSpeed,
        health_bar: HealthBar,
        scheduler: Scheduler,
    }

    impl Fixture {
        fn new(state: EnemyState) -> Self {
            Self {
                brain: EnemyBrain {
                    state,
                    ..Default::default()
                },
                config: EnemyConfig::default(),
                command: MovementCommand::Idle,
                speed: MovementSpeed::default(),
                health_bar: HealthBar::default(),
                scheduler: Scheduler::default(),
            }
        }

        fn enemy(&mut self) -> (Enemy<'_>, &mut Scheduler) {
            (
                Enemy {
                    entity: Entity::from_raw(1),
                    brain: &mut self.brain,
                    config: &self.config,
                    command: &mut self.command,
                    speed: &mut self.speed,
                    health_bar: &mut self.health_bar,
                },
                &mut self.scheduler,
            )
        }
    }

    fn player() -> Entity {
        Entity::from_raw(100)
    }

    #[test]
    fn test_set_combat_target_in_attack_radius() {
        let mut fixture = Fixture::new(EnemyState::Patrolling);
        let (mut enemy, scheduler) = fixture.enemy();

        // Дистанция 40 при AttackRadius 50 → сразу Attacking
        enemy.set_combat_target(player(), Some(40.0), scheduler);

        assert_eq!(fixture.brain.state, EnemyState::Attacking);
        assert_eq!(fixture.brain.combat_target, Some(player()));
        let Some(handle) = fixture.brain.attack_timer else {
            panic!("attack timer must be armed");
        };
        assert_eq!(fixture.scheduler.remaining(handle), Some(0.5));
    }

    #[test]
    fn test_set_combat_target_out_of_reach_chases() {
        let mut fixture = Fixture::new(EnemyState::Patrolling);
        fixture.brain.patrol_timer = Some(fixture.scheduler.schedule(
            Entity::from_raw(1),
            ScheduledTask::PatrolPauseFinished,
            2.0,
        ));

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.set_combat_target(player(), Some(300.0), scheduler);

        assert_eq!(fixture.brain.state, EnemyState::Chasing);
        assert_eq!(fixture.speed.speed, 300.0);
        assert_eq!(fixture.command.target(), Some(player()));
        assert!(fixture.brain.patrol_timer.is_none());
        assert!(fixture.scheduler.is_empty());
    }

    #[test]
    fn test_chasing_target_leaves_combat_radius() {
        let mut fixture = Fixture::new(EnemyState::Chasing);
        fixture.brain.combat_target = Some(player());
        fixture.brain.patrol_target = Some(Entity::from_raw(50));
        fixture.health_bar.show(0.5);

        let (mut enemy, scheduler) = fixture.enemy();
        let check = enemy.check_combat_target(Some(600.0), scheduler);

        assert_eq!(check, CombatCheck::LostInterest);
        assert_eq!(fixture.brain.state, EnemyState::Patrolling);
        assert!(fixture.brain.combat_target.is_none());
        assert!(!fixture.health_bar.visible);
        assert_eq!(fixture.speed.speed, 125.0);
        assert_eq!(fixture.command.target(), Some(Entity::from_raw(50)));
    }

    #[test]
    fn test_engaged_never_auto_downgrades() {
        let mut fixture = Fixture::new(EnemyState::Engaged);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.check_combat_target(Some(300.0), scheduler);
        assert_eq!(fixture.brain.state, EnemyState::Engaged);

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.check_combat_target(Some(900.0), scheduler);
        assert_eq!(fixture.brain.state, EnemyState::Engaged);
        assert!(fixture.brain.combat_target.is_none());
    }

    #[test]
    fn test_in_combat_radius_out_of_attack_radius_chases() {
        let mut fixture = Fixture::new(EnemyState::Attacking);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, scheduler) = fixture.enemy();
        let check = enemy.check_combat_target(Some(200.0), scheduler);

        assert_eq!(check, CombatCheck::OutOfReach);
        assert_eq!(fixture.brain.state, EnemyState::Chasing);
    }

    #[test]
    fn test_chasing_into_attack_radius_queues_attack() {
        let mut fixture = Fixture::new(EnemyState::Chasing);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, scheduler) = fixture.enemy();
        assert_eq!(enemy.check_combat_target(Some(45.0), scheduler), CombatCheck::AttackQueued);
        assert_eq!(fixture.brain.state, EnemyState::Attacking);

        // Повторный tick не перевзводит таймер
        let handle = fixture.brain.attack_timer;
        let (mut enemy, scheduler) = fixture.enemy();
        assert_eq!(enemy.check_combat_target(Some(45.0), scheduler), CombatCheck::Holding);
        assert_eq!(fixture.brain.attack_timer, handle);
        assert_eq!(fixture.scheduler.len(), 1);
    }

    #[test]
    fn test_attack_against_dead_target_clears_it() {
        let mut fixture = Fixture::new(EnemyState::Attacking);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, _) = fixture.enemy();
        assert!(!enemy.attack(true));
        assert!(fixture.brain.combat_target.is_none());
        assert_eq!(fixture.brain.state, EnemyState::Attacking);

        fixture.brain.combat_target = Some(player());
        let (mut enemy, _) = fixture.enemy();
        assert!(enemy.attack(false));
        assert_eq!(fixture.brain.state, EnemyState::Engaged);
    }

    #[test]
    fn test_attack_end_rechecks_immediately() {
        let mut fixture = Fixture::new(EnemyState::Engaged);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, scheduler) = fixture.enemy();
        assert_eq!(enemy.attack_end(Some(30.0), scheduler), CombatCheck::AttackQueued);
        assert_eq!(fixture.brain.state, EnemyState::Attacking);
    }

    #[test]
    fn test_pawn_seen_ignored_while_busy() {
        for state in [EnemyState::Chasing, EnemyState::Attacking, EnemyState::Engaged, EnemyState::Dead] {
            let mut fixture = Fixture::new(state);
            let (mut enemy, scheduler) = fixture.enemy();
            assert!(!enemy.on_pawn_seen(player(), true, false, Some(100.0), scheduler));
            assert!(fixture.brain.combat_target.is_none());
        }
    }

    #[test]
    fn test_pawn_seen_requires_engageable_alive_pawn() {
        let mut fixture = Fixture::new(EnemyState::Patrolling);

        let (mut enemy, scheduler) = fixture.enemy();
        assert!(!enemy.on_pawn_seen(player(), false, false, Some(100.0), scheduler));
        let (mut enemy, scheduler) = fixture.enemy();
        assert!(!enemy.on_pawn_seen(player(), true, true, Some(100.0), scheduler));
        let (mut enemy, scheduler) = fixture.enemy();
        assert!(enemy.on_pawn_seen(player(), true, false, Some(100.0), scheduler));

        assert_eq!(fixture.brain.state, EnemyState::Chasing);
    }

    #[test]
    fn test_patrol_target_excludes_current() {
        let markers: Vec<Entity> = (10..13).map(Entity::from_raw).collect();
        let mut fixture = Fixture::new(EnemyState::Patrolling);
        fixture.brain.patrol_markers = markers.clone();
        fixture.brain.patrol_target = Some(markers[0]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let before = fixture.brain.patrol_target;
            let (mut enemy, _) = fixture.enemy();
            let next = enemy.choose_patrol_target(&mut rng);
            assert!(next.is_some());
            assert_ne!(next, before);
        }
    }

    #[test]
    fn test_single_marker_keeps_target() {
        let marker = Entity::from_raw(10);
        let mut fixture = Fixture::new(EnemyState::Patrolling);
        fixture.brain.patrol_markers = vec![marker];
        fixture.brain.patrol_target = Some(marker);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.check_patrol_target(Some(10.0), &mut rng, scheduler);

        assert_eq!(fixture.brain.patrol_target, Some(marker));
        assert!(fixture.brain.patrol_timer.is_none());
    }

    #[test]
    fn test_waypoint_reached_arms_pause() {
        let markers: Vec<Entity> = (10..12).map(Entity::from_raw).collect();
        let mut fixture = Fixture::new(EnemyState::Idle);
        fixture.brain.patrol_markers = markers.clone();
        fixture.brain.patrol_target = Some(markers[0]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.check_patrol_target(Some(150.0), &mut rng, scheduler);

        assert_eq!(fixture.brain.state, EnemyState::Patrolling);
        assert_eq!(fixture.brain.patrol_target, Some(markers[1]));
        let Some(handle) = fixture.brain.patrol_timer else {
            panic!("patrol timer must be armed");
        };
        let Some(pause) = fixture.scheduler.remaining(handle) else {
            panic!("patrol timer must be pending");
        };
        assert!((0.5..=5.0).contains(&pause));
    }

    #[test]
    fn test_waypoint_far_away_no_change() {
        let markers: Vec<Entity> = (10..12).map(Entity::from_raw).collect();
        let mut fixture = Fixture::new(EnemyState::Patrolling);
        fixture.brain.patrol_markers = markers.clone();
        fixture.brain.patrol_target = Some(markers[0]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.check_patrol_target(Some(201.0), &mut rng, scheduler);

        assert_eq!(fixture.brain.patrol_target, Some(markers[0]));
        assert!(fixture.scheduler.is_empty());
    }

    #[test]
    fn test_get_hit_rearms_attack_in_radius() {
        let mut fixture = Fixture::new(EnemyState::Engaged);
        fixture.brain.combat_target = Some(player());

        let (mut enemy, scheduler) = fixture.enemy();
        enemy.on_get_hit(Some(30.0), true, scheduler);
        assert_eq!(fixture.brain.state, EnemyState::Attacking);
        assert_eq!(fixture.scheduler.len(), 1);

        // Вне радиуса: таймеры сняты, Engaged откатывается в Idle
        fixture.brain.state = EnemyState::Engaged;
        let (mut enemy, scheduler) = fixture.enemy();
        enemy.on_get_hit(Some(300.0), true, scheduler);
        assert_eq!(fixture.brain.state, EnemyState::Idle);
        assert!(fixture.scheduler.is_empty());
    }

    #[test]
    fn test_die_clears_timers_and_schedules_lifespan() {
        let mut fixture = Fixture::new(EnemyState::Attacking);
        let (mut enemy, scheduler) = fixture.enemy();
        enemy.start_attack_timer(scheduler);
        fixture.health_bar.show(0.2);

        let (mut enemy, scheduler) = fixture.enemy();
        let lifespan = enemy.die(scheduler);

        assert_eq!(fixture.brain.state, EnemyState::Dead);
        assert!(fixture.brain.attack_timer.is_none());
        assert!(!fixture.health_bar.visible);
        assert_eq!(fixture.command, MovementCommand::Stop);
        assert_eq!(fixture.scheduler.len(), 1);
        assert_eq!(fixture.scheduler.remaining(lifespan), Some(3.0));
    }
}
