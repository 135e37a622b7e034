//! Spawn helpers: готовые bundles акторов и пропов из GameConfig
//!
//! Хост (или тест) спавнит entity одним вызовом, begin play системы доделывают остальное.

use bevy::prelude::*;

use crate::ai::{DefaultWeapon, EnemyBrain, ItemDrop, PatrolMarker};
use crate::character::SlashCharacter;
use crate::components::{Actor, Faction, MovementSpeed};
use crate::config::GameConfig;
use crate::items::{weapon_pickup_bundle, LootKind};
use crate::world::{Bird, Breakable};

/// Игрок: Actor(Player) + SlashCharacter (Engageable, PickupReceiver через require)
pub fn player_bundle(config: &GameConfig, location: Vec3) -> impl Bundle {
    (
        Name::new("SlashCharacter"),
        Actor::new(Faction::Player),
        SlashCharacter::default(),
        config.player.attributes,
        config.player.hit_react,
        MovementSpeed {
            speed: config.player.move_speed,
        },
        Transform::from_translation(location),
    )
}

/// Враг: Actor(Enemy) + EnemyBrain с пулом waypoint'ов
///
/// Оружие (DefaultWeapon) заспавнится на begin play.
pub fn enemy_bundle(config: &GameConfig, location: Vec3, patrol_markers: Vec<Entity>) -> impl Bundle {
    (
        Name::new("Enemy"),
        Actor::new(Faction::Enemy),
        EnemyBrain::with_patrol(patrol_markers),
        config.enemy,
        config.enemy_attributes,
        config.enemy_hit_react,
        config.sensing,
        DefaultWeapon(config.weapon),
        MovementSpeed {
            speed: config.enemy.patrol_speed,
        },
        Transform::from_translation(location),
    )
}

/// Враг с дропом при смерти
pub fn enemy_with_drop_bundle(
    config: &GameConfig,
    location: Vec3,
    patrol_markers: Vec<Entity>,
    drop: LootKind,
) -> impl Bundle {
    (enemy_bundle(config, location, patrol_markers), ItemDrop(drop))
}

pub fn patrol_marker_bundle(location: Vec3) -> impl Bundle {
    (Name::new("PatrolTarget"), PatrolMarker, Transform::from_translation(location))
}

pub fn breakable_bundle(location: Vec3, treasure_values: Vec<i32>) -> impl Bundle {
    (
        Name::new("Breakable"),
        Breakable::with_treasure(treasure_values),
        Transform::from_translation(location),
    )
}

pub fn weapon_bundle(config: &GameConfig, location: Vec3) -> impl Bundle {
    weapon_pickup_bundle(&config.weapon, location)
}

pub fn bird_bundle(location: Vec3) -> impl Bundle {
    (Name::new("Bird"), Bird, Transform::from_translation(location))
}
