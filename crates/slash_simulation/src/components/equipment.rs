//! Экипировка: что у актора в руках и к какому socket привязан предмет

use bevy::prelude::*;

/// Оружие персонажа (одно на актора)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Equipment {
    pub weapon: Option<Entity>,
}

/// Socket на скелете персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Socket {
    /// Оружие врага (сразу в руке)
    WeaponSocket,
    /// Оружие игрока в ножнах за спиной
    SpineSocket,
    /// Оружие игрока в руке
    RightHandSocket,
}

impl Socket {
    pub fn name(&self) -> &'static str {
        match self {
            Socket::WeaponSocket => "WeaponSocket",
            Socket::SpineSocket => "SpineSocket",
            Socket::RightHandSocket => "RightHandSocket",
        }
    }
}

/// Attachment — привязка предмета к socket родителя
///
/// Хост снапит mesh предмета к socket (keep world scale).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attachment {
    pub parent: Entity,
    pub socket: Socket,
}

impl Attachment {
    pub fn new(parent: Entity, socket: Socket) -> Self {
        Self { parent, socket }
    }
}
