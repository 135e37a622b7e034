//! Player reaction systems (anim notifies, hit, death).

use bevy::prelude::*;

use crate::character::slash_character::{ActionState, CharacterState, SlashCharacter};
use crate::combat::{AnimNotify, EffectCue, EffectRequest, EntityDied, GetHit};
use crate::components::{Attachment, Attributes, Equipment, Socket};

/// System: animation notifies игрока
///
/// - AttackEnd / DodgeEnd → Unoccupied
/// - HitReactEnd → Unoccupied (если жив)
/// - EquipEnd → Unoccupied + оружие в руку (TwoHandWeapon) или за спину (Unequipped)
///
/// Мёртвый персонаж остаётся Dead.
pub fn player_anim_notifies(
    mut commands: Commands,
    mut notifies: EventReader<AnimNotify>,
    mut players: Query<(&mut SlashCharacter, &Attributes, &Equipment, &Transform)>,
    mut effects: EventWriter<EffectRequest>,
) {
    for notify in notifies.read() {
        let Ok((mut character, attributes, equipment, transform)) = players.get_mut(notify.entity()) else {
            continue;
        };
        if character.is_dead() {
            continue;
        }

        match *notify {
            AnimNotify::AttackEnd { .. } | AnimNotify::DodgeEnd { .. } => {
                character.action_state = ActionState::Unoccupied;
            }
            AnimNotify::HitReactEnd { .. } => {
                if attributes.is_alive() {
                    character.action_state = ActionState::Unoccupied;
                }
            }
            AnimNotify::EquipEnd { entity, equipped } => {
                character.action_state = ActionState::Unoccupied;
                let Some(weapon) = equipment.weapon else {
                    continue;
                };

                let socket = if equipped {
                    character.character_state = CharacterState::TwoHandWeapon;
                    effects.write(EffectRequest::from_source(EffectCue::EquipSound, transform.translation, weapon));
                    Socket::RightHandSocket
                } else {
                    character.character_state = CharacterState::Unequipped;
                    Socket::SpineSocket
                };

                if let Ok(mut weapon_commands) = commands.get_entity(weapon) {
                    weapon_commands.insert(Attachment::new(entity, socket));
                }
            }
            AnimNotify::WeaponCollision { .. } => {}
        }
    }
}

/// System: GetHit игрока → HitReaction (ДО базовой реакции)
pub fn player_get_hit(mut hit_events: EventReader<GetHit>, mut players: Query<&mut SlashCharacter>) {
    for hit in hit_events.read() {
        let Ok(mut character) = players.get_mut(hit.target) else {
            continue;
        };
        if !character.is_dead() {
            character.action_state = ActionState::HitReaction;
        }
    }
}

/// System: смерть игрока (после базовой process_deaths)
pub fn player_die(mut death_events: EventReader<EntityDied>, mut players: Query<&mut SlashCharacter>) {
    for event in death_events.read() {
        let Ok(mut character) = players.get_mut(event.entity) else {
            continue;
        };
        character.die();
        crate::log_info(&format!("🪦 Player {:?} died (killer {:?})", event.entity, event.killer));
    }
}
