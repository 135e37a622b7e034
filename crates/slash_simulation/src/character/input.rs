//! Player input: PlayerInput events → действия SlashCharacter
//!
//! Хост маппит устройства ввода в PlayerInput (для headless тестов — пишем события напрямую).

use bevy::prelude::*;

use crate::character::slash_character::{ActionState, CharacterState, SlashCharacter};
use crate::combat::montage::{full_montage_command, play_random_section, section_command};
use crate::combat::{AnimationCommand, EffectRequest, MontageSlot, Montages, Weapon};
use crate::components::{Attributes, ControlRotation, Equipment, JumpIntent, MovementInput, Socket};
use crate::items::{drop_weapon, equip_weapon, Item, ItemKind, PickupSphere};
use crate::DeterministicRng;

/// Действие игрока (один input за событие)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// x — вправо, y — вперёд (относительно yaw камеры)
    Move(Vec2),
    /// x — yaw, y — pitch (градусы)
    Look(Vec2),
    Jump,
    /// Подобрать оружие или достать/убрать текущее
    Pickup,
    Attack,
    Dodge,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub entity: Entity,
    pub action: InputAction,
}

impl PlayerInput {
    pub fn new(entity: Entity, action: InputAction) -> Self {
        Self { entity, action }
    }
}

/// System: сброс MovementInput в начале tick (input накапливается заново)
pub fn reset_movement_input(mut movers: Query<&mut MovementInput>) {
    for mut input in &mut movers {
        if input.direction != Vec3::ZERO {
            input.direction = Vec3::ZERO;
        }
    }
}

/// System: обработка PlayerInput
///
/// Gates (can_move, can_attack, ...) проверяются до любых изменений состояния.
pub fn handle_player_input(
    mut commands: Commands,
    mut inputs: EventReader<PlayerInput>,
    mut players: Query<(
        &mut SlashCharacter,
        &mut Attributes,
        &mut MovementInput,
        &mut ControlRotation,
        &mut Equipment,
        &Montages,
        &Transform,
    )>,
    mut weapons: Query<(&mut Item, &mut Weapon, &mut PickupSphere, &Transform)>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationCommand>,
    mut jumps: EventWriter<JumpIntent>,
    mut effects: EventWriter<EffectRequest>,
) {
    for input in inputs.read() {
        let entity = input.entity;
        let Ok((mut character, mut attributes, mut movement, mut control, mut equipment, montages, transform)) =
            players.get_mut(entity)
        else {
            continue;
        };

        match input.action {
            InputAction::Move(value) => {
                if !character.can_move() {
                    continue;
                }
                let (forward, right) = control.planar_axes();
                movement.direction += forward * value.y + right * value.x;
            }
            InputAction::Look(value) => {
                control.add_input(value);
            }
            InputAction::Jump => {
                if character.can_jump() {
                    jumps.write(JumpIntent { entity });
                }
            }
            InputAction::Attack => {
                if !character.can_attack() {
                    continue;
                }
                character.action_state = ActionState::Attacking;
                play_random_section(&mut rng.rng, entity, montages, MontageSlot::Attack, &mut animations);
            }
            InputAction::Dodge => {
                if !character.can_move() || !character.can_dodge(&attributes) {
                    continue;
                }
                character.action_state = ActionState::Dodge;
                attributes.use_dodge_stamina();
                if let Some(montage) = montages.get(MontageSlot::Dodge) {
                    animations.write(full_montage_command(entity, MontageSlot::Dodge, montage));
                }
            }
            InputAction::Pickup => {
                let overlapping_weapon = character.overlapping_item.filter(|item| {
                    weapons
                        .get(*item)
                        .is_ok_and(|(item, _, _, _)| item.kind == ItemKind::Weapon)
                });

                if let Some(new_weapon) = overlapping_weapon {
                    if let Some(old_weapon) = equipment.weapon.filter(|old| *old != new_weapon) {
                        drop_weapon(&mut commands, &mut weapons, old_weapon, transform.translation);
                    }
                    equip_weapon(&mut commands, &mut weapons, new_weapon, entity, Socket::SpineSocket, &mut effects);
                    equipment.weapon = Some(new_weapon);
                    character.set_overlapping_item(None);
                    character.character_state = CharacterState::Unequipped;
                } else if character.can_disarm() {
                    play_equip_section(entity, montages, false, &mut animations);
                    character.action_state = ActionState::Equipping;
                } else if character.can_arm(equipment.weapon.is_some()) {
                    play_equip_section(entity, montages, true, &mut animations);
                    character.action_state = ActionState::Equipping;
                }
            }
        }
    }
}

/// "Equip" — из-за спины в руку, "Unequip" — обратно
fn play_equip_section(entity: Entity, montages: &Montages, equip: bool, animations: &mut EventWriter<AnimationCommand>) {
    let Some(montage) = montages.get(MontageSlot::Equip) else {
        return;
    };
    let section = if equip { "Equip" } else { "Unequip" };
    animations.write(section_command(entity, MontageSlot::Equip, montage, section));
}
