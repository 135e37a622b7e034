//! Enemy FSM components (state, brain, tuning).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::components::sensing::PawnSensing;
use crate::combat::{HitReactConfig, Montages, WarpTargets, WeaponConfig};
use crate::components::{Equipment, MovementCommand, MovementSpeed, OrientToMovement};
use crate::hud::HealthBar;
use crate::items::LootKind;
use crate::scheduler::TaskHandle;

/// Состояния врага
///
/// Порядок объявления = порядок сравнения (`state > Patrolling` значит "в бою").
/// Dead сортируется ниже всех, поэтому всегда проверяется явно.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub enum EnemyState {
    Dead,
    /// Начальное состояние и после конца атаки
    #[default]
    Idle,
    Patrolling,
    Chasing,
    /// Ждём attack timer
    Attacking,
    /// Attack montage играет
    Engaged,
}

impl EnemyState {
    pub fn in_combat(self) -> bool {
        self > EnemyState::Patrolling
    }
}

/// Мозг врага: состояние FSM, цели и handles таймеров
///
/// combat_target / patrol_target — слабые ссылки: entity могла исчезнуть,
/// неудачный lookup трактуется как "цели нет".
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(
    EnemyConfig,
    MovementCommand,
    MovementSpeed,
    HealthBar,
    Equipment,
    WarpTargets,
    OrientToMovement,
    PawnSensing,
    Montages,
    HitReactConfig
)]
pub struct EnemyBrain {
    pub state: EnemyState,
    pub combat_target: Option<Entity>,
    pub patrol_target: Option<Entity>,
    /// Пул waypoint'ов патруля (entities с Transform)
    pub patrol_markers: Vec<Entity>,
    pub patrol_timer: Option<TaskHandle>,
    pub attack_timer: Option<TaskHandle>,
}

impl EnemyBrain {
    pub fn with_patrol(patrol_markers: Vec<Entity>) -> Self {
        Self {
            patrol_markers,
            ..Default::default()
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }
}

/// Tuning врага (радиусы, скорости, задержки)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    pub combat_radius: f32,
    pub attack_radius: f32,
    /// Waypoint считается достигнутым в этом радиусе
    pub patrol_radius: f32,
    pub patrol_wait_min: f32,
    pub patrol_wait_max: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Пауза перед атакой (секунды)
    pub attack_delay: f32,
    /// Сколько труп лежит до despawn (секунды)
    pub death_lifespan: f32,
    pub acceptance_radius: f32,
    /// Высота спавна дропа над трупом
    pub drop_height: f32,
    pub warp_target_offset: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            combat_radius: 500.0,
            attack_radius: 50.0,
            patrol_radius: 200.0,
            patrol_wait_min: 0.5,
            patrol_wait_max: 5.0,
            patrol_speed: 125.0,
            chase_speed: 300.0,
            attack_delay: 0.5,
            death_lifespan: 3.0,
            acceptance_radius: 15.0,
            drop_height: 25.0,
            warp_target_offset: crate::combat::warp::DEFAULT_WARP_TARGET_DISTANCE,
        }
    }
}

/// Маркер: waypoint патруля
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct PatrolMarker;

/// Оружие, которое враг спавнит себе на begin play
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultWeapon(pub WeaponConfig);

/// Что выпадает из врага при смерти
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ItemDrop(pub LootKind);
