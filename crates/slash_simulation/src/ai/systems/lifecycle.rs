//! Enemy begin play: оружие в руку, первый waypoint, патруль

use bevy::prelude::*;

use crate::ai::components::{DefaultWeapon, EnemyBrain};
use crate::ai::enemy::EnemyParts;
use crate::combat::{EffectCue, EffectRequest};
use crate::components::{Actor, Equipment, Faction, Socket};
use crate::items::equipped_weapon_bundle;
use crate::DeterministicRng;

/// System: begin play для только что заспавненных врагов
///
/// 1. Фракция Enemy (враг не бьёт врага)
/// 2. DefaultWeapon → weapon entity в "WeaponSocket" + equip sound
/// 3. Health bar скрыт
/// 4. Случайный waypoint → Patrolling
pub fn enemy_begin_play(
    mut commands: Commands,
    mut enemies: Query<(EnemyParts, Option<&DefaultWeapon>, &mut Equipment, Option<&mut Actor>), Added<EnemyBrain>>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<EffectRequest>,
) {
    for (mut parts, default_weapon, mut equipment, actor) in &mut enemies {
        let entity = parts.entity;
        let location = parts.transform.translation;

        if let Some(mut actor) = actor {
            actor.faction = Faction::Enemy;
        }

        if let Some(DefaultWeapon(config)) = default_weapon {
            let weapon = commands
                .spawn(equipped_weapon_bundle(config, entity, Socket::WeaponSocket, location))
                .id();
            equipment.weapon = Some(weapon);
            effects.write(EffectRequest::from_source(EffectCue::EquipSound, location, weapon));
        }

        let mut enemy = parts.enemy();
        enemy.health_bar.hide();

        if enemy.choose_patrol_target(&mut rng.rng).is_some() {
            enemy.start_patrolling();
        } else {
            crate::log_warning(&format!("Enemy {:?} has no patrol markers, staying idle", entity));
        }

        crate::log(&format!(
            "👹 Enemy {:?} begin play (weapon: {:?}, patrol markers: {})",
            entity,
            equipment.weapon,
            enemy.brain.patrol_markers.len()
        ));
    }
}
