//! SLASH Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (headless): персонаж игрока, враги с FSM,
//! ближний бой, предметы, breakables.
//!
//! Хост (рендер, анимации, звук, навигация) общается с симуляцией только через
//! события (AnimationCommand, EffectRequest, PlayerInput, AnimNotify) и data компоненты.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod character;
pub mod combat;
pub mod components;
pub mod config;
pub mod hud;
pub mod items;
pub mod logger;
pub mod physics;
pub mod scheduler;
pub mod spawn;
pub mod world;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, EnemyBrain, EnemyConfig, EnemyState, PawnSeen};
pub use character::{ActionState, CharacterPlugin, CharacterState, InputAction, PlayerInput, SlashCharacter};
pub use combat::{
    AnimNotify, AnimationCommand, CombatPlugin, DamageDealt, Dead, EffectCue, EffectRequest, EntityDied, GetHit,
    MontageSlot, Montages, TakeDamage, Weapon,
};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use hud::{HealthBar, HudOverlay, HudPlugin};
pub use items::{Item, ItemKind, ItemState, ItemsPlugin, LootKind};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::LocomotionPlugin;
pub use scheduler::{ScheduledTask, Scheduler, TaskHandle, TimerFired};
pub use world::{Bird, BirdInput, Breakable, WorldPlugin};

/// Фиксированный шаг симуляции (60Hz)
pub const FIXED_STEP: Duration = Duration::from_micros(16_667);

/// Фазы одного simulation tick (FixedUpdate), выполняются строго по порядку
///
/// Внутри одного tick GetHit обрабатывается раньше TakeDamage того же удара.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Scheduler, сброс ввода, stamina regen
    Timers,
    /// Anim notifies и player/bird input
    Input,
    /// Begin play врагов, зрение
    Perception,
    /// Enemy FSM
    Ai,
    /// Kinematic locomotion
    Movement,
    /// Weapon sweep
    Combat,
    /// GetHit реакции
    HitReaction,
    /// TakeDamage → Attributes
    Damage,
    /// Смерть и lifespan
    Death,
    /// Подбор предметов
    Items,
    /// HUD
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Конфиг и seed могли вставить до plugin (тесты, main) — не перезаписываем
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::default());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            let seed = app.world().resource::<GameConfig>().simulation.seed;
            app.insert_resource(DeterministicRng::new(seed));
        }
        if !app.world().contains_resource::<Time<Fixed>>() {
            app.insert_resource(Time::<Fixed>::from_duration(FIXED_STEP));
        }

        app.init_resource::<Scheduler>()
            .add_event::<TimerFired>()
            .add_event::<JumpIntent>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Timers,
                    SimulationSet::Input,
                    SimulationSet::Perception,
                    SimulationSet::Ai,
                    SimulationSet::Movement,
                    SimulationSet::Combat,
                    SimulationSet::HitReaction,
                    SimulationSet::Damage,
                    SimulationSet::Death,
                    SimulationSet::Items,
                    SimulationSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, scheduler::tick_scheduler.in_set(SimulationSet::Timers))
            // Подсистемы (ECS strategic layer)
            .add_plugins((
                CombatPlugin,
                AIPlugin,
                CharacterPlugin,
                ItemsPlugin,
                WorldPlugin,
                HudPlugin,
                LocomotionPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ручными шагами FIXED_STEP: каждый `app.update()` (кроме самого первого,
/// у которого delta = 0) выполняет ровно один FixedUpdate tick.
pub fn create_headless_app(seed: u64) -> App {
    let mut config = GameConfig::default();
    config.simulation.seed = seed;
    create_headless_app_with_config(config)
}

pub fn create_headless_app_with_config(config: GameConfig) -> App {
    init_logger();
    if let Some(level) = config.log_level() {
        logger::set_log_level(level);
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(config.simulation.seed))
        .insert_resource(config)
        .insert_resource(Time::<Fixed>::from_duration(FIXED_STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_STEP))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
