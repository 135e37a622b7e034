//! Damage pipeline: TakeDamage → Attributes → DamageDealt / EntityDied → смерть
//!
//! Порядок внутри tick: GetHit реакции идут ДО apply_damage для того же удара.

use bevy::prelude::*;

use crate::combat::montage::{random_section_command, AnimationCommand, MontageSlot, Montages};
use crate::combat::weapon::{set_wielder_weapon_collision, Weapon};
use crate::components::{Attributes, Equipment, Hurtbox};
use crate::DeterministicRng;

/// Hit interface: по актору попали (реакция, без урона)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GetHit {
    pub target: Entity,
    pub impact_point: Vec3,
    /// Кто ударил (для направленной реакции). None — реакция без направления.
    pub hitter: Option<Entity>,
}

/// Запрос урона
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TakeDamage {
    pub target: Entity,
    pub amount: f32,
    /// Кто нанёс (персонаж-владелец оружия)
    pub instigator: Option<Entity>,
    /// Чем нанесли (оружие)
    pub causer: Option<Entity>,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Attributes.
/// Используется для HUD, health bar врага.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв (бывший tag "Dead")
///
/// Трупы врагов убираются по LifeSpanExpired, игрок остаётся лежать.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Какая секция death montage сыграла (поза трупа для anim blueprint хоста)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct DeathPose(pub usize);

/// Система: apply damage от TakeDamage событий
///
/// 1. Мёртвые цели игнорируют урон
/// 2. Применяем damage к Attributes (clamp в [0, max])
/// 3. Генерируем DamageDealt и EntityDied события
pub fn apply_damage(
    mut damage_events: EventReader<TakeDamage>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Attributes>,
) {
    for event in damage_events.read() {
        // Breakables и прочие без Attributes урон не принимают
        let Ok(mut attributes) = targets.get_mut(event.target) else {
            continue;
        };

        if !attributes.is_alive() {
            continue;
        }

        attributes.change_health(-event.amount);
        let target_died = !attributes.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: event.instigator,
            target: event.target,
            damage: event.amount,
            target_died,
        });

        if target_died {
            entity_died_events.write(EntityDied {
                entity: event.target,
                killer: event.instigator,
            });

            crate::log_info(&format!(
                "💀 Entity {:?} killed by {:?}",
                event.target, event.instigator
            ));
        }
    }
}

/// Система: базовая смерть персонажа
///
/// - маркер Dead + DeathPose
/// - случайная секция death montage
/// - hurtbox выключен (capsule + mesh)
/// - коллизия оружия выключена
///
/// Специализации (игрок, враг) подписаны на тот же EntityDied.
pub fn process_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut actors: Query<(Option<&Montages>, Option<&mut Hurtbox>, Option<&Equipment>)>,
    mut weapons: Query<&mut Weapon>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationCommand>,
) {
    for event in death_events.read() {
        let Ok((montages, hurtbox, equipment)) = actors.get_mut(event.entity) else {
            continue;
        };

        let pose = montages
            .and_then(|montages| montages.death.as_ref())
            .map(|montage| {
                let (index, command) = random_section_command(&mut rng.rng, event.entity, MontageSlot::Death, montage);
                animations.write(command);
                index
            })
            .unwrap_or(0);

        if let Some(mut hurtbox) = hurtbox {
            hurtbox.enabled = false;
        }

        set_wielder_weapon_collision(equipment, &mut weapons, false);

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert((Dead, DeathPose(pose)));
        }
    }
}
