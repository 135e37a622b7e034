//! Базовая реакция персонажа на GetHit
//!
//! Специализации подписаны на тот же event:
//! - игрок ставит HitReaction ДО базовой реакции (character::systems::player_get_hit)
//! - враг чистит таймеры ПОСЛЕ (ai::systems::reactions::enemy_get_hit)
//! - breakable ломается (world::breakable)

use bevy::prelude::*;

use crate::combat::damage::GetHit;
use crate::combat::effects::{EffectCue, EffectRequest};
use crate::combat::hit_react::{hit_react_section, HitReactConfig, HitReactSection};
use crate::combat::montage::{full_montage_command, section_command, AnimationCommand, MontageSlot, Montages};
use crate::combat::weapon::{set_wielder_weapon_collision, Weapon};
use crate::components::{Attributes, Equipment};

/// Hit react montage: Default секция = montage целиком
pub fn hit_react_command(entity: Entity, montages: &Montages, section: HitReactSection) -> Option<AnimationCommand> {
    let montage = montages.hit_react.as_ref()?;
    Some(match section {
        HitReactSection::Default => full_montage_command(entity, MontageSlot::HitReact, montage),
        directional => section_command(entity, MontageSlot::HitReact, montage, directional.as_str()),
    })
}

/// Система: базовый GetHit персонажа
///
/// 1. Выключаем коллизию своего оружия (удар прерывает swing)
/// 2. Живой + известен ударивший → hit react montage
/// 3. Звук и частицы на точке удара
pub fn process_get_hit(
    mut hit_events: EventReader<GetHit>,
    characters: Query<(&Transform, &Attributes, Option<&HitReactConfig>, Option<&Montages>, Option<&Equipment>)>,
    hitters: Query<&Transform>,
    mut weapons: Query<&mut Weapon>,
    mut animations: EventWriter<AnimationCommand>,
    mut effects: EventWriter<EffectRequest>,
) {
    for hit in hit_events.read() {
        let Ok((transform, attributes, config, montages, equipment)) = characters.get(hit.target) else {
            continue;
        };
        let config = config.copied().unwrap_or_default();

        set_wielder_weapon_collision(equipment, &mut weapons, false);

        let hitter_location = hit.hitter.and_then(|hitter| hitters.get(hitter).ok()).map(|t| t.translation);
        if let (true, Some(hitter_location), Some(montages)) = (attributes.is_alive(), hitter_location, montages) {
            let section = hit_react_section(&config, transform.forward().as_vec3(), transform.translation, hitter_location);
            if let Some(command) = hit_react_command(hit.target, montages, section) {
                animations.write(command);
            }
        }

        if config.play_sound {
            effects.write(EffectRequest::from_source(EffectCue::HitSound, hit.impact_point, hit.target));
        }
        if config.spawn_particles {
            effects.write(EffectRequest::from_source(EffectCue::HitParticles, hit.impact_point, hit.target));
        }
    }
}
