//! SlashCharacter — персонаж игрока: состояния и gates
//!
//! Акторы С этим компонентом получают команды от player input systems,
//! враги (EnemyBrain) управляются AI systems.

use bevy::prelude::*;

use crate::combat::{HitReactConfig, Montages};
use crate::components::{
    Attributes, ControlRotation, Engageable, Equipment, MovementInput, MovementSpeed, OrientToMovement,
    PickupReceiver,
};

/// Что в руках
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum CharacterState {
    #[default]
    Unequipped,
    OneHandWeapon,
    TwoHandWeapon,
    Dead,
}

/// Чем персонаж занят (ровно одно активное действие)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
pub enum ActionState {
    #[default]
    Unoccupied,
    HitReaction,
    Attacking,
    Equipping,
    Dodge,
    Dead,
}

/// Персонаж игрока
///
/// Engageable: враги выбирают его combat target'ом.
/// PickupReceiver: подбирает оружие, treasure и souls.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(
    MovementInput,
    ControlRotation,
    MovementSpeed,
    OrientToMovement,
    Equipment,
    Montages,
    HitReactConfig,
    Engageable,
    PickupReceiver
)]
pub struct SlashCharacter {
    pub action_state: ActionState,
    pub character_state: CharacterState,
    /// Оружие, в сфере подбора которого стоим
    pub overlapping_item: Option<Entity>,
}

impl SlashCharacter {
    pub fn can_attack(&self) -> bool {
        self.action_state == ActionState::Unoccupied && self.character_state != CharacterState::Unequipped
    }

    pub fn can_disarm(&self) -> bool {
        self.character_state != CharacterState::Unequipped && self.action_state == ActionState::Unoccupied
    }

    /// Достать оружие из-за спины (если оно есть)
    pub fn can_arm(&self, has_weapon: bool) -> bool {
        self.character_state == CharacterState::Unequipped && self.action_state == ActionState::Unoccupied && has_weapon
    }

    pub fn can_move(&self) -> bool {
        self.action_state == ActionState::Unoccupied
    }

    pub fn can_jump(&self) -> bool {
        self.can_move()
    }

    pub fn can_dodge(&self, attributes: &Attributes) -> bool {
        self.action_state == ActionState::Unoccupied && attributes.can_use_dodge()
    }

    pub fn is_dead(&self) -> bool {
        self.action_state == ActionState::Dead
    }

    pub fn set_overlapping_item(&mut self, item: Option<Entity>) {
        self.overlapping_item = item;
    }

    pub fn die(&mut self) {
        self.character_state = CharacterState::Dead;
        self.action_state = ActionState::Dead;
    }
}
