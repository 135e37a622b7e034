//! AI reaction systems (hit, damage, death, lifespan).

use bevy::prelude::*;

use crate::ai::components::{EnemyBrain, ItemDrop};
use crate::ai::enemy::{distance_to, EnemyParts};
use crate::combat::montage::stop_command;
use crate::combat::{AnimationCommand, DamageDealt, EntityDied, GetHit, MontageSlot, Montages, TakeDamage};
use crate::components::{Attributes, Equipment, OrientToMovement};
use crate::hud::HealthBar;
use crate::items::loot_bundle;
use crate::scheduler::{ScheduledTask, Scheduler, TimerFired};

/// System: GetHit специализация врага (после базовой реакции)
///
/// Таймеры сброшены, attack montage остановлен; в attack radius и живой → снова attack timer.
pub fn enemy_get_hit(
    mut hit_events: EventReader<GetHit>,
    mut enemies: Query<(EnemyParts, &Attributes, &Montages)>,
    transforms: Query<&Transform>,
    mut scheduler: ResMut<Scheduler>,
    mut animations: EventWriter<AnimationCommand>,
) {
    for hit in hit_events.read() {
        let Ok((mut parts, attributes, montages)) = enemies.get_mut(hit.target) else {
            continue;
        };
        if parts.brain.is_dead() {
            continue;
        }

        let alive = attributes.is_alive();
        let distance = parts.combat_target_distance(&transforms);
        let mut enemy = parts.enemy();
        enemy.on_damaged(alive, attributes.health_percent());

        if let Some(montage) = montages.get(MontageSlot::Attack) {
            animations.write(stop_command(hit.target, MontageSlot::Attack, montage));
        }
        enemy.on_get_hit(distance, alive, &mut scheduler);
    }
}

/// System: TakeDamage специализация врага (ДО apply_damage)
///
/// Ударивший становится combat target. Мёртвые и урон от самого себя пропускаются.
pub fn enemy_take_damage(
    mut damage_events: EventReader<TakeDamage>,
    mut enemies: Query<(EnemyParts, &Attributes)>,
    transforms: Query<&Transform>,
    mut scheduler: ResMut<Scheduler>,
) {
    for event in damage_events.read() {
        let Some(instigator) = event.instigator.filter(|instigator| *instigator != event.target) else {
            continue;
        };
        let Ok((mut parts, attributes)) = enemies.get_mut(event.target) else {
            continue;
        };
        if parts.brain.is_dead() || !attributes.is_alive() {
            continue;
        }

        let distance = distance_to(parts.transform, Some(instigator), &transforms);
        parts.enemy().set_combat_target(instigator, distance, &mut scheduler);
    }
}

/// System: после урона живой враг показывает health bar с новым процентом
pub fn enemy_damage_feedback(
    mut dealt_events: EventReader<DamageDealt>,
    mut enemies: Query<(&Attributes, &mut HealthBar), With<EnemyBrain>>,
) {
    for event in dealt_events.read() {
        let Ok((attributes, mut health_bar)) = enemies.get_mut(event.target) else {
            continue;
        };
        if attributes.is_alive() {
            health_bar.show(attributes.health_percent());
        }
    }
}

/// System: смерть врага (после базовой process_deaths)
///
/// Dead state, таймеры сняты, lifespan взведён, дроп над трупом.
pub fn enemy_die(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut enemies: Query<(EnemyParts, &mut OrientToMovement, Option<&ItemDrop>)>,
    mut scheduler: ResMut<Scheduler>,
) {
    for event in death_events.read() {
        let Ok((mut parts, mut orient, drop)) = enemies.get_mut(event.entity) else {
            continue;
        };
        if parts.brain.is_dead() {
            continue;
        }

        let lifespan = parts.enemy().die(&mut scheduler);
        orient.0 = false;

        if let Some(ItemDrop(kind)) = drop {
            let location = parts.transform.translation + Vec3::Y * parts.config.drop_height;
            commands.spawn(loot_bundle(*kind, location));
        }

        crate::log_info(&format!(
            "☠️ Enemy {:?} died (killer {:?}), despawn in {:.1}s",
            event.entity,
            event.killer,
            scheduler.remaining(lifespan).unwrap_or_default()
        ));
    }
}

/// System: LifeSpanExpired → despawn врага вместе с оружием
pub fn enemy_lifespan_expired(
    mut commands: Commands,
    mut fired_events: EventReader<TimerFired>,
    enemies: Query<&Equipment, With<EnemyBrain>>,
    mut scheduler: ResMut<Scheduler>,
) {
    for fired in fired_events.read() {
        if fired.task != ScheduledTask::LifeSpanExpired {
            continue;
        }
        let Ok(equipment) = enemies.get(fired.entity) else {
            continue;
        };

        if let Some(weapon) = equipment.weapon {
            if let Ok(mut weapon_commands) = commands.get_entity(weapon) {
                weapon_commands.despawn();
            }
        }
        if let Ok(mut entity_commands) = commands.get_entity(fired.entity) {
            entity_commands.despawn();
        }
        scheduler.cancel_entity(fired.entity);

        crate::log(&format!("🧹 Enemy {:?} despawned (lifespan expired)", fired.entity));
    }
}
