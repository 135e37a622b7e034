//! Enemy — операции FSM врага поверх компонентов одной entity
//!
//! Системы собирают `Enemy` из query (`EnemyParts::enemy()`), считают дистанции
//! до целей по Transform и вызывают операции. Таймеры ставятся в Scheduler,
//! старый handle всегда отменяется перед новым arm.

use bevy::ecs::query::QueryData;
use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{EnemyBrain, EnemyConfig, EnemyState};
use crate::components::{MovementCommand, MovementSpeed};
use crate::hud::HealthBar;
use crate::scheduler::{ScheduledTask, Scheduler, TaskHandle};

/// Дистанция ≤ radius — в зоне. Нет цели — вне зоны.
pub fn in_range(distance: Option<f32>, radius: f32) -> bool {
    distance.is_some_and(|distance| distance <= radius)
}

/// Query всех компонентов FSM врага
#[derive(QueryData)]
#[query_data(mutable)]
pub struct EnemyParts {
    pub entity: Entity,
    pub brain: &'static mut EnemyBrain,
    pub config: &'static EnemyConfig,
    pub transform: &'static Transform,
    pub command: &'static mut MovementCommand,
    pub speed: &'static mut MovementSpeed,
    pub health_bar: &'static mut HealthBar,
}

impl EnemyPartsItem<'_> {
    pub fn enemy(&mut self) -> Enemy<'_> {
        Enemy {
            entity: self.entity,
            brain: &mut self.brain,
            config: self.config,
            command: &mut self.command,
            speed: &mut self.speed,
            health_bar: &mut self.health_bar,
        }
    }

    /// Дистанция до combat target (None — цели нет или она исчезла)
    pub fn combat_target_distance(&self, transforms: &Query<&Transform>) -> Option<f32> {
        distance_to(self.transform, self.brain.combat_target, transforms)
    }

    pub fn patrol_target_distance(&self, transforms: &Query<&Transform>) -> Option<f32> {
        distance_to(self.transform, self.brain.patrol_target, transforms)
    }
}

pub fn distance_to(me: &Transform, target: Option<Entity>, transforms: &Query<&Transform>) -> Option<f32> {
    let target = transforms.get(target?).ok()?;
    Some(me.translation.distance(target.translation))
}

/// Итог check_combat_target (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatCheck {
    /// Цель вне combat radius: потеряли интерес
    LostInterest,
    /// Цель в combat radius, но вне attack radius
    OutOfReach,
    /// Attack timer взведён
    AttackQueued,
    /// Ничего не изменилось
    Holding,
}

/// Mutable view на FSM одного врага
pub struct Enemy<'a> {
    pub entity: Entity,
    pub brain: &'a mut EnemyBrain,
    pub config: &'a EnemyConfig,
    pub command: &'a mut MovementCommand,
    pub speed: &'a mut MovementSpeed,
    pub health_bar: &'a mut HealthBar,
}

impl Enemy<'_> {
    pub fn state(&self) -> EnemyState {
        self.brain.state
    }

    /// Нет цели — запрос движения невалиден, старый move снимается
    pub fn move_to(&mut self, target: Option<Entity>) {
        *self.command = match target {
            Some(target) => MovementCommand::MoveToActor {
                target,
                acceptance_radius: self.config.acceptance_radius,
            },
            None => MovementCommand::Stop,
        };
    }

    pub fn start_patrolling(&mut self) {
        self.brain.state = EnemyState::Patrolling;
        self.speed.speed = self.config.patrol_speed;
        self.move_to(self.brain.patrol_target);
        crate::log(&format!("🚶 Enemy {:?}: start patrol → {:?}", self.entity, self.brain.patrol_target));
    }

    pub fn start_chasing(&mut self) {
        self.brain.state = EnemyState::Chasing;
        self.speed.speed = self.config.chase_speed;
        self.move_to(self.brain.combat_target);
        crate::log(&format!("🏃 Enemy {:?}: chasing {:?}", self.entity, self.brain.combat_target));
    }

    pub fn lose_interest(&mut self) {
        self.brain.combat_target = None;
        self.health_bar.hide();
    }

    pub fn clear_patrol_timer(&mut self, scheduler: &mut Scheduler) {
        scheduler.cancel_slot(&mut self.brain.patrol_timer);
    }

    pub fn clear_attack_timer(&mut self, scheduler: &mut Scheduler) {
        scheduler.cancel_slot(&mut self.brain.attack_timer);
    }

    /// Attacking + attack timer (attack_delay). Старый таймер отменяется.
    pub fn start_attack_timer(&mut self, scheduler: &mut Scheduler) -> TaskHandle {
        self.brain.state = EnemyState::Attacking;
        self.clear_attack_timer(scheduler);
        let handle = scheduler.schedule(self.entity, ScheduledTask::EnemyAttack, self.config.attack_delay);
        self.brain.attack_timer = Some(handle);
        handle
    }

    /// Можно начать атаку: не атакуем уже, цель в attack radius, живы
    pub fn can_attack(&self, target_distance: Option<f32>) -> bool {
        self.brain.state < EnemyState::Attacking
            && in_range(target_distance, self.config.attack_radius)
            && self.brain.state != EnemyState::Dead
    }

    /// Новая combat target: в attack radius → Attacking (таймер взведён), иначе погоня
    pub fn set_combat_target(&mut self, target: Entity, target_distance: Option<f32>, scheduler: &mut Scheduler) {
        self.brain.combat_target = Some(target);
        self.clear_patrol_timer(scheduler);

        if in_range(target_distance, self.config.attack_radius) {
            self.start_attack_timer(scheduler);
        } else {
            self.start_chasing();
        }
    }

    /// Каждый tick пока state > Patrolling
    ///
    /// - вне combat radius → потеря интереса, патруль (кроме Engaged)
    /// - не в погоне и вне attack radius → погоня (кроме Engaged)
    /// - можем атаковать → attack timer
    pub fn check_combat_target(&mut self, target_distance: Option<f32>, scheduler: &mut Scheduler) -> CombatCheck {
        if !in_range(target_distance, self.config.combat_radius) {
            self.clear_attack_timer(scheduler);
            self.lose_interest();
            if self.brain.state != EnemyState::Engaged {
                self.start_patrolling();
            }
            CombatCheck::LostInterest
        } else if self.brain.state != EnemyState::Chasing && !in_range(target_distance, self.config.attack_radius) {
            self.clear_attack_timer(scheduler);
            if self.brain.state != EnemyState::Engaged {
                self.start_chasing();
            }
            CombatCheck::OutOfReach
        } else if self.can_attack(target_distance) {
            self.start_attack_timer(scheduler);
            CombatCheck::AttackQueued
        } else {
            CombatCheck::Holding
        }
    }

    /// Случайный waypoint кроме текущего. Если другого нет — остаёмся на текущем.
    pub fn choose_patrol_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Entity> {
        let current = self.brain.patrol_target;
        let candidates: Vec<Entity> = self
            .brain
            .patrol_markers
            .iter()
            .copied()
            .filter(|marker| Some(*marker) != current)
            .collect();

        self.brain.patrol_target = if candidates.is_empty() {
            current.filter(|current| self.brain.patrol_markers.contains(current))
        } else {
            Some(candidates[rng.gen_range(0..candidates.len())])
        };
        self.brain.patrol_target
    }

    /// Каждый tick пока state ≤ Patrolling: дошли до waypoint → новый + пауза
    pub fn check_patrol_target<R: Rng + ?Sized>(
        &mut self,
        patrol_distance: Option<f32>,
        rng: &mut R,
        scheduler: &mut Scheduler,
    ) {
        let old_target = self.brain.patrol_target;
        self.brain.state = EnemyState::Patrolling;

        if !in_range(patrol_distance, self.config.patrol_radius) {
            return;
        }

        let next = self.choose_patrol_target(rng);
        if next.is_none() || next == old_target {
            return;
        }

        let (min, max) = (
            self.config.patrol_wait_min.min(self.config.patrol_wait_max),
            self.config.patrol_wait_min.max(self.config.patrol_wait_max),
        );
        let pause = rng.gen_range(min..=max);

        self.clear_patrol_timer(scheduler);
        self.brain.patrol_timer = Some(scheduler.schedule(self.entity, ScheduledTask::PatrolPauseFinished, pause));
        crate::log(&format!("⏸️ Enemy {:?}: waypoint reached, next {:?} in {:.2}s", self.entity, next, pause));
    }

    pub fn patrol_pause_finished(&mut self) {
        self.move_to(self.brain.patrol_target);
    }

    /// Sensing callback. true если pawn стал combat target.
    pub fn on_pawn_seen(
        &mut self,
        pawn: Entity,
        engageable: bool,
        pawn_dead: bool,
        pawn_distance: Option<f32>,
        scheduler: &mut Scheduler,
    ) -> bool {
        if self.brain.state >= EnemyState::Chasing || self.brain.state == EnemyState::Dead {
            return false;
        }
        if !engageable || pawn_dead {
            return false;
        }

        self.set_combat_target(pawn, pawn_distance, scheduler);
        true
    }

    /// Attack timer сработал. true — играть attack montage.
    pub fn attack(&mut self, target_dead: bool) -> bool {
        if self.brain.combat_target.is_some() && target_dead {
            self.brain.combat_target = None;
            return false;
        }
        self.brain.state = EnemyState::Engaged;
        true
    }

    pub fn attack_end(&mut self, target_distance: Option<f32>, scheduler: &mut Scheduler) -> CombatCheck {
        self.brain.state = EnemyState::Idle;
        self.check_combat_target(target_distance, scheduler)
    }

    /// После базовой реакции на удар: таймеры сброшены, в attack radius — новый attack timer
    ///
    /// Attack montage остановлен системой, поэтому Engaged без таймера откатывается в Idle.
    pub fn on_get_hit(&mut self, target_distance: Option<f32>, alive: bool, scheduler: &mut Scheduler) {
        self.clear_patrol_timer(scheduler);
        self.clear_attack_timer(scheduler);

        if alive && in_range(target_distance, self.config.attack_radius) {
            self.start_attack_timer(scheduler);
        } else if self.brain.state == EnemyState::Engaged {
            self.brain.state = EnemyState::Idle;
        }
    }

    /// После урона: живой враг показывает health bar
    pub fn on_damaged(&mut self, alive: bool, health_percent: f32) {
        if alive {
            self.health_bar.show(health_percent);
        }
    }

    /// Смерть: Dead, таймеры сняты, health bar скрыт, lifespan взведён
    pub fn die(&mut self, scheduler: &mut Scheduler) -> TaskHandle {
        self.brain.state = EnemyState::Dead;
        self.clear_attack_timer(scheduler);
        self.clear_patrol_timer(scheduler);
        self.health_bar.hide();
        *self.command = MovementCommand::Stop;

        scheduler.schedule(self.entity, ScheduledTask::LifeSpanExpired, self.config.death_lifespan)
    }
}
