//! Item компоненты и bundles
//!
//! # Архитектура
//!
//! **Item** — предмет в мире (оружие, treasure, soul):
//! - `ItemState::Hovering` — лежит в мире, покачивается, подбирается через PickupSphere
//! - `ItemState::Equipped` — в руках/за спиной владельца (Attachment к socket)
//!
//! **ItemKind** — что будет при подборе:
//! - Weapon → становится overlapping item персонажа (подбор по кнопке)
//! - Treasure / Soul → подбираются сразу при overlap и исчезают

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{Weapon, WeaponConfig};
use crate::components::{Attachment, Socket};

// ============================================================================
// Item
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum ItemState {
    #[default]
    Hovering,
    Equipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ItemKind {
    Weapon,
    Treasure { gold: i32 },
    Soul { souls: i32 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Item {
    pub state: ItemState,
    pub kind: ItemKind,
}

impl Item {
    pub fn hovering(kind: ItemKind) -> Self {
        Self {
            state: ItemState::Hovering,
            kind,
        }
    }
}

/// Дроп из врага / breakable (config-friendly подмножество ItemKind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Treasure { gold: i32 },
    Soul { souls: i32 },
}

impl LootKind {
    pub fn item_kind(self) -> ItemKind {
        match self {
            LootKind::Treasure { gold } => ItemKind::Treasure { gold },
            LootKind::Soul { souls } => ItemKind::Soul { souls },
        }
    }
}

// ============================================================================
// Pickup sphere + hover
// ============================================================================

/// Сфера подбора вокруг предмета
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PickupSphere {
    pub radius: f32,
    pub enabled: bool,
    /// Кто сейчас внутри (для begin/end overlap)
    pub overlapping: Vec<Entity>,
}

impl Default for PickupSphere {
    fn default() -> Self {
        Self {
            radius: 60.0,
            enabled: true,
            overlapping: Vec::new(),
        }
    }
}

impl PickupSphere {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Покачивание лежащего предмета: offset = amplitude · sin(lifetime · period) каждый tick
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hover {
    pub amplitude: f32,
    pub period: f32,
    pub lifetime: f32,
}

impl Default for Hover {
    fn default() -> Self {
        Self {
            amplitude: 0.25,
            period: 5.0,
            lifetime: 0.0,
        }
    }
}

impl Hover {
    /// Сдвиг по Y за этот tick (lifetime уже увеличен)
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.lifetime += delta;
        self.amplitude * (self.lifetime * self.period).sin()
    }
}

// ============================================================================
// Bundles
// ============================================================================

/// Оружие лежит в мире и ждёт подбора
pub fn weapon_pickup_bundle(config: &WeaponConfig, location: Vec3) -> impl Bundle {
    (
        Name::new("Weapon"),
        Item::hovering(ItemKind::Weapon),
        config.to_weapon(),
        PickupSphere::default(),
        Hover::default(),
        Transform::from_translation(location),
    )
}

/// Оружие сразу в руках владельца (враг на begin play)
pub fn equipped_weapon_bundle(config: &WeaponConfig, owner: Entity, socket: Socket, location: Vec3) -> impl Bundle {
    let mut weapon = config.to_weapon();
    weapon.owner = Some(owner);

    (
        Name::new("Weapon"),
        Item {
            state: ItemState::Equipped,
            kind: ItemKind::Weapon,
        },
        weapon,
        Attachment::new(owner, socket),
        PickupSphere::disabled(),
        Transform::from_translation(location),
    )
}

/// Treasure / Soul в мире
pub fn loot_bundle(kind: LootKind, location: Vec3) -> impl Bundle {
    let name = match kind {
        LootKind::Treasure { .. } => "Treasure",
        LootKind::Soul { .. } => "Soul",
    };
    (
        Name::new(name),
        Item::hovering(kind.item_kind()),
        PickupSphere::default(),
        Hover::default(),
        Transform::from_translation(location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_offset_follows_sine() {
        let mut hover = Hover::default();

        let offset = hover.advance(0.1);
        assert!((hover.lifetime - 0.1).abs() < 1e-6);
        assert!((offset - 0.25 * 0.5_f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_loot_kind_maps_to_item_kind() {
        assert_eq!(LootKind::Treasure { gold: 5 }.item_kind(), ItemKind::Treasure { gold: 5 });
        assert_eq!(LootKind::Soul { souls: 2 }.item_kind(), ItemKind::Soul { souls: 2 });
    }

    #[test]
    fn test_disabled_sphere() {
        let sphere = PickupSphere::disabled();
        assert!(!sphere.enabled);
        assert_eq!(sphere.radius, 60.0);
    }
}
