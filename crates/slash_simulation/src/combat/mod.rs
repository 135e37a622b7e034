//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Attributes, Weapon (окно коллизии + реестр попаданий)
//! - Combat rules: box sweep, hit react сектор, damage → death
//! - Events: GetHit, TakeDamage, DamageDealt, EntityDied
//!
//! Хост ответственность:
//! - проиграть AnimationCommand, прислать AnimNotify (окно коллизии, конец атаки)
//! - проиграть EffectRequest (звук, частицы, force field)

use bevy::prelude::*;

pub mod damage;
pub mod effects;
pub mod get_hit;
pub mod hit_react;
pub mod montage;
pub mod stamina;
pub mod warp;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use damage::{apply_damage, process_deaths, DamageDealt, Dead, DeathPose, EntityDied, GetHit, TakeDamage};
pub use effects::{EffectCue, EffectRequest};
pub use get_hit::process_get_hit;
pub use hit_react::{HitReactConfig, HitReactSection};
pub use montage::{AnimNotify, AnimationCommand, Montage, MontageSlot, Montages};
pub use warp::WarpTargets;
pub use weapon::{Weapon, WeaponConfig};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения (по SimulationSet):
/// 1. regenerate_stamina — восстановление stamina
/// 2. toggle_weapon_collision — AnimNotify окна коллизии
/// 3. weapon_sweep — попадания → GetHit, TakeDamage
/// 4. process_get_hit — базовая реакция на удар
/// 5. apply_damage — TakeDamage → Attributes → DamageDealt/EntityDied
/// 6. process_deaths — Dead, death montage, hurtbox off
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<GetHit>()
            .add_event::<TakeDamage>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<AnimationCommand>()
            .add_event::<AnimNotify>()
            .add_event::<EffectRequest>();

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: Stamina
                stamina::regenerate_stamina.in_set(SimulationSet::Timers),
                // Фаза 2: окно коллизии от анимации
                weapon::toggle_weapon_collision.in_set(SimulationSet::Input),
                // Фаза 3: попадания оружия
                weapon::weapon_sweep.in_set(SimulationSet::Combat),
                // Фаза 4: реакция на удар (до урона)
                get_hit::process_get_hit.in_set(SimulationSet::HitReaction),
                // Фаза 5: урон
                damage::apply_damage.in_set(SimulationSet::Damage),
                // Фаза 6: смерть
                damage::process_deaths.in_set(SimulationSet::Death),
            ),
        );
    }
}
