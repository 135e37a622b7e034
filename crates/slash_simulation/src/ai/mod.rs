//! AI decision-making module
//!
//! Enemy FSM: Idle → Patrolling → Chasing → Attacking → Engaged (+ Dead).
//! Таймеры (пауза патруля, задержка атаки, lifespan трупа) живут в Scheduler.

use bevy::prelude::*;

pub mod components;
pub mod enemy;
pub mod events;
pub mod systems;

#[cfg(test)]
mod enemy_tests;

// Re-export основных типов
pub use components::{
    DefaultWeapon, EnemyBrain, EnemyConfig, EnemyState, ItemDrop, PatrolMarker, PawnSensing,
};
pub use enemy::{CombatCheck, Enemy, EnemyParts};
pub use events::PawnSeen;

use crate::combat::{apply_damage, process_deaths, process_get_hit};
use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. Perception — begin play, конус зрения, PawnSeen → combat target
/// 2. Ai — сработавшие таймеры, AttackEnd, tick FSM, warp targets
/// 3. HitReaction — enemy_get_hit после базовой реакции
/// 4. Damage — enemy_take_damage до apply_damage, health bar после
/// 5. Death — enemy_die после process_deaths, despawn по lifespan
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PawnSeen>();

        app.add_systems(
            FixedUpdate,
            (
                systems::enemy_begin_play,
                systems::sense_pawns,
                systems::enemy_on_pawn_seen,
            )
                .chain()
                .in_set(SimulationSet::Perception),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::enemy_timer_callbacks,
                systems::enemy_attack_end,
                systems::enemy_tick,
                systems::update_warp_targets,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::enemy_get_hit
                    .in_set(SimulationSet::HitReaction)
                    .after(process_get_hit),
                (systems::enemy_take_damage.before(apply_damage), systems::enemy_damage_feedback.after(apply_damage))
                    .in_set(SimulationSet::Damage),
                (systems::enemy_die.after(process_deaths), systems::enemy_lifespan_expired)
                    .in_set(SimulationSet::Death),
            ),
        );
    }
}
