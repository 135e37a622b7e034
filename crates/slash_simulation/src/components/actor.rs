//! Базовые компоненты акторов: Actor, Attributes, статусы и capability маркеры

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Актор (игрок, враг) — базовый компонент для живых существ
///
/// Автоматически добавляет Attributes, Hurtbox, HitReceiver и Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Attributes, Hurtbox, HitReceiver, Transform)]
pub struct Actor {
    pub faction: Faction,
}

impl Actor {
    pub fn new(faction: Faction) -> Self {
        Self { faction }
    }
}

/// Фракция актора (вместо string tag "Enemy")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum Faction {
    Player,
    Enemy,
    #[default]
    Neutral,
}

impl Faction {
    /// Враги не бьют друг друга своим оружием
    pub fn is_friendly_with(self, other: Faction) -> bool {
        self == Faction::Enemy && other == Faction::Enemy
    }
}

/// Маркер: актор может стать combat target врага (бывший tag "EngageableTarget")
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Engageable;

/// Capability: актор реагирует на `GetHit` (персонажи, breakables)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HitReceiver;

/// Capability: актор подбирает предметы (оружие, treasure, souls)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PickupReceiver;

/// Коллизия тела для weapon sweep (сфера вокруг Transform)
///
/// На смерти выключается (capsule + mesh collision off).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub radius: f32,
    pub enabled: bool,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self {
            radius: 40.0,
            enabled: true,
        }
    }
}

/// Атрибуты актора: health, stamina, gold, souls
///
/// Инвариант: 0 ≤ health ≤ max_health, 0 ≤ stamina ≤ max_stamina.
/// Gold и souls не ограничены (могут уйти в минус).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct Attributes {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub gold: i32,
    pub souls: i32,
    /// units per second
    pub stamina_regen_rate: f32,
    pub dodge_cost: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

impl Attributes {
    pub fn new(max_health: f32, max_stamina: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
            gold: 0,
            souls: 0,
            stamina_regen_rate: 8.0,
            dodge_cost: 10.0,
        }
    }

    /// Clamp в [0, max_health]. Отрицательная delta = урон.
    pub fn change_health(&mut self, delta: f32) {
        self.health = (self.health + delta).clamp(0.0, self.max_health.max(0.0));
    }

    /// Clamp в [0, max_stamina]. Отрицательная delta восстанавливает stamina.
    pub fn use_stamina(&mut self, delta: f32) {
        self.stamina = (self.stamina - delta).clamp(0.0, self.max_stamina.max(0.0));
    }

    pub fn change_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add(delta);
    }

    pub fn change_souls(&mut self, delta: i32) {
        self.souls = self.souls.saturating_add(delta);
    }

    pub fn health_percent(&self) -> f32 {
        percent(self.health, self.max_health)
    }

    pub fn stamina_percent(&self) -> f32 {
        percent(self.stamina, self.max_stamina)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn can_use_dodge(&self) -> bool {
        self.stamina >= self.dodge_cost
    }

    pub fn use_dodge_stamina(&mut self) {
        self.use_stamina(self.dodge_cost);
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        if self.stamina < self.max_stamina {
            self.use_stamina(-self.stamina_regen_rate * delta_time);
        }
    }
}

fn percent(current: f32, max: f32) -> f32 {
    if max > 0.0 {
        current / max
    } else {
        0.0
    }
}
