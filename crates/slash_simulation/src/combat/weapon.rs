//! Оружие ближнего боя: окно коллизии, box sweep, реестр попаданий за swing
//!
//! Swing = интервал между AnimNotify::WeaponCollision { enabled: true } и { enabled: false }.
//! За один swing каждая цель получает урон максимум один раз.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::damage::{GetHit, TakeDamage};
use crate::combat::effects::{EffectCue, EffectRequest};
use crate::combat::montage::AnimNotify;
use crate::components::{Actor, Equipment, Faction, HitReceiver, Hurtbox};

/// Оружие (живёт на отдельной entity, привязано к wielder через Attachment)
///
/// `trace_start`/`trace_end` — в локальных координатах владельца.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Weapon {
    pub damage: f32,
    pub box_extents: Vec3,
    pub trace_start: Vec3,
    pub trace_end: Vec3,
    pub owner: Option<Entity>,
    pub collision_enabled: bool,
    /// Кого уже ударили за текущий swing
    pub actors_hit_this_attack: Vec<Entity>,
    /// Кто сейчас внутри weapon box (begin overlap срабатывает один раз)
    overlapping: Vec<Entity>,
}

impl Default for Weapon {
    fn default() -> Self {
        WeaponConfig::default().to_weapon()
    }
}

impl Weapon {
    /// Выключение очищает реестр попаданий: следующий swing бьёт заново
    pub fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
        if !enabled {
            self.actors_hit_this_attack.clear();
            self.overlapping.clear();
        }
    }

    /// AddUnique: true если актор добавлен впервые за swing
    pub fn register_hit(&mut self, actor: Entity) -> bool {
        if self.actors_hit_this_attack.contains(&actor) {
            return false;
        }
        self.actors_hit_this_attack.push(actor);
        true
    }

    pub fn sweep_radius(&self) -> f32 {
        self.box_extents.max_element()
    }
}

/// Tuning оружия из config (массивы вместо Vec3 — toml-friendly)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub damage: f32,
    pub box_extents: [f32; 3],
    pub trace_start: [f32; 3],
    pub trace_end: [f32; 3],
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 20.0,
            box_extents: [5.0, 5.0, 5.0],
            // Клинок перед персонажем (forward = -Z)
            trace_start: [0.0, 0.0, -40.0],
            trace_end: [0.0, 0.0, -120.0],
        }
    }
}

impl WeaponConfig {
    pub fn to_weapon(&self) -> Weapon {
        Weapon {
            damage: self.damage,
            box_extents: Vec3::from_array(self.box_extents),
            trace_start: Vec3::from_array(self.trace_start),
            trace_end: Vec3::from_array(self.trace_end),
            owner: None,
            collision_enabled: false,
            actors_hit_this_attack: Vec::new(),
            overlapping: Vec::new(),
        }
    }
}

/// Кандидат на попадание: hurtbox актора в world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepCandidate {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub faction: Faction,
    pub receives_hits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub entity: Entity,
    pub impact_point: Vec3,
    /// Доля пути start → end до попадания, [0, 1]
    pub fraction: f32,
}

/// Пересечение отрезка, раздутого на sweep_radius, со сферой.
/// Возвращает долю пути ближайшей к центру точки отрезка.
pub fn segment_sphere_fraction(start: Vec3, end: Vec3, sweep_radius: f32, center: Vec3, radius: f32) -> Option<f32> {
    let segment = end - start;
    let length_squared = segment.length_squared();
    let fraction = if length_squared > f32::EPSILON {
        ((center - start).dot(segment) / length_squared).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = start + segment * fraction;
    (closest.distance(center) <= sweep_radius + radius).then_some(fraction)
}

/// Box trace: первое попадание вдоль start → end, кроме `ignore`
pub fn box_trace(
    start: Vec3,
    end: Vec3,
    extents: Vec3,
    candidates: &[SweepCandidate],
    ignore: &[Entity],
) -> Option<SweepHit> {
    let sweep_radius = extents.max_element();

    candidates
        .iter()
        .filter(|candidate| !ignore.contains(&candidate.entity))
        .filter_map(|candidate| {
            let fraction = segment_sphere_fraction(start, end, sweep_radius, candidate.center, candidate.radius)?;
            let closest = start + (end - start) * fraction;
            let impact_point = candidate.center + (closest - candidate.center).normalize_or_zero() * candidate.radius;
            Some(SweepHit {
                entity: candidate.entity,
                impact_point,
                fraction,
            })
        })
        .min_by(|a, b| a.fraction.total_cmp(&b.fraction))
}

/// Включить/выключить коллизию оружия в руках актора
pub fn set_wielder_weapon_collision(equipment: Option<&Equipment>, weapons: &mut Query<&mut Weapon>, enabled: bool) {
    let Some(weapon_entity) = equipment.and_then(|equipment| equipment.weapon) else {
        return;
    };
    if let Ok(mut weapon) = weapons.get_mut(weapon_entity) {
        weapon.set_collision_enabled(enabled);
    }
}

/// Система: AnimNotify::WeaponCollision → окно коллизии оружия
pub fn toggle_weapon_collision(
    mut notifies: EventReader<AnimNotify>,
    wielders: Query<&Equipment>,
    mut weapons: Query<&mut Weapon>,
) {
    for notify in notifies.read() {
        let AnimNotify::WeaponCollision { entity, enabled } = *notify else {
            continue;
        };
        set_wielder_weapon_collision(wielders.get(entity).ok(), &mut weapons, enabled);
    }
}

/// Система: weapon sweep для всех оружий с открытым окном коллизии
///
/// 1. Begin overlap: hurtbox вошёл в weapon box (один раз, пока не вышел)
/// 2. Враг не бьёт врага
/// 3. Box trace start → end (игнорируя оружие, владельца и уже ударенных)
/// 4. Попадание: реестр → GetHit + force field → TakeDamage
pub fn weapon_sweep(
    mut weapons: Query<(Entity, &mut Weapon)>,
    wielders: Query<(&Transform, Option<&Actor>)>,
    targets: Query<(Entity, &Transform, &Hurtbox, Option<&Actor>, Has<HitReceiver>)>,
    mut get_hit_events: EventWriter<GetHit>,
    mut take_damage_events: EventWriter<TakeDamage>,
    mut effects: EventWriter<EffectRequest>,
) {
    let candidates: Vec<SweepCandidate> = targets
        .iter()
        .filter(|(_, _, hurtbox, _, _)| hurtbox.enabled)
        .map(|(entity, transform, hurtbox, actor, receives_hits)| SweepCandidate {
            entity,
            center: transform.translation,
            radius: hurtbox.radius,
            faction: actor.map(|actor| actor.faction).unwrap_or_default(),
            receives_hits,
        })
        .collect();

    for (weapon_entity, mut weapon) in &mut weapons {
        if !weapon.collision_enabled {
            continue;
        }
        let Some(owner) = weapon.owner else {
            continue;
        };
        let Ok((owner_transform, owner_actor)) = wielders.get(owner) else {
            continue;
        };
        let owner_faction = owner_actor.map(|actor| actor.faction).unwrap_or_default();

        let start = owner_transform.transform_point(weapon.trace_start);
        let end = owner_transform.transform_point(weapon.trace_end);
        let sweep_radius = weapon.sweep_radius();

        let overlapping: Vec<&SweepCandidate> = candidates
            .iter()
            .filter(|candidate| candidate.entity != owner && candidate.entity != weapon_entity)
            .filter(|candidate| {
                segment_sphere_fraction(start, end, sweep_radius, candidate.center, candidate.radius).is_some()
            })
            .collect();

        let began: Vec<&SweepCandidate> = overlapping
            .iter()
            .copied()
            .filter(|candidate| !weapon.overlapping.contains(&candidate.entity))
            .collect();
        weapon.overlapping = overlapping.iter().map(|candidate| candidate.entity).collect();

        for other in began {
            if owner_faction.is_friendly_with(other.faction) {
                continue;
            }

            let mut ignore = weapon.actors_hit_this_attack.clone();
            ignore.extend([weapon_entity, owner]);

            let Some(hit) = box_trace(start, end, weapon.box_extents, &candidates, &ignore) else {
                continue;
            };
            let Some(hit_candidate) = candidates.iter().find(|candidate| candidate.entity == hit.entity) else {
                continue;
            };

            weapon.register_hit(hit.entity);

            if owner_faction.is_friendly_with(hit_candidate.faction) {
                continue;
            }

            if hit_candidate.receives_hits {
                get_hit_events.write(GetHit {
                    target: hit.entity,
                    impact_point: hit.impact_point,
                    hitter: Some(owner),
                });
                effects.write(EffectRequest::from_source(
                    EffectCue::WeaponForceField,
                    hit.impact_point,
                    weapon_entity,
                ));
            }
            take_damage_events.write(TakeDamage {
                target: hit.entity,
                amount: weapon.damage,
                instigator: Some(owner),
                causer: Some(weapon_entity),
            });

            crate::log(&format!(
                "⚔️ Weapon {:?} (owner {:?}) hit {:?} for {}",
                weapon_entity, owner, hit.entity, weapon.damage
            ));
        }
    }
}
