//! Item systems: покачивание, overlap сферы подбора, подбор
//!
//! # Systems
//!
//! - `hover_items` — лежащие предметы покачиваются
//! - `detect_item_overlaps` — begin/end overlap сферы с pickup receivers
//! - `handle_item_overlaps` — weapon → overlapping item, treasure/soul → подбор + despawn

use bevy::prelude::*;

use crate::character::SlashCharacter;
use crate::combat::{EffectCue, EffectRequest, Weapon};
use crate::components::{Attachment, Attributes, Hurtbox, PickupReceiver, Socket};
use crate::hud::HudOverlay;
use crate::items::item::{Hover, Item, ItemKind, ItemState, PickupSphere};

/// Begin/end overlap сферы подбора с актором
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOverlap {
    Began { item: Entity, actor: Entity },
    Ended { item: Entity, actor: Entity },
}

/// Сфера подбора пересекается с актором (hurtbox как сфера, без hurtbox — точка)
pub fn sphere_overlaps(item_location: Vec3, sphere_radius: f32, actor_location: Vec3, actor_radius: f32) -> bool {
    item_location.distance(actor_location) <= sphere_radius + actor_radius
}

/// Оружие в руки/за спину: Equipped, владелец, Attachment к socket, equip sound, сфера выключена
pub fn equip_weapon(
    commands: &mut Commands,
    weapons: &mut Query<(&mut Item, &mut Weapon, &mut PickupSphere, &Transform)>,
    weapon_entity: Entity,
    owner: Entity,
    socket: Socket,
    effects: &mut EventWriter<EffectRequest>,
) -> bool {
    let Ok((mut item, mut weapon, mut sphere, transform)) = weapons.get_mut(weapon_entity) else {
        return false;
    };

    item.state = ItemState::Equipped;
    weapon.owner = Some(owner);
    sphere.enabled = false;
    sphere.overlapping.clear();

    if let Ok(mut entity_commands) = commands.get_entity(weapon_entity) {
        entity_commands.insert(Attachment::new(owner, socket)).remove::<Hover>();
    }
    effects.write(EffectRequest::from_source(EffectCue::EquipSound, transform.translation, weapon_entity));

    crate::log(&format!(
        "🗡️ Weapon {:?} equipped by {:?} → {}",
        weapon_entity,
        owner,
        socket.name()
    ));
    true
}

/// Старое оружие падает к ногам владельца и снова ждёт подбора
pub fn drop_weapon(
    commands: &mut Commands,
    weapons: &mut Query<(&mut Item, &mut Weapon, &mut PickupSphere, &Transform)>,
    weapon_entity: Entity,
    location: Vec3,
) {
    let Ok((mut item, mut weapon, mut sphere, _)) = weapons.get_mut(weapon_entity) else {
        return;
    };

    item.state = ItemState::Hovering;
    weapon.owner = None;
    weapon.set_collision_enabled(false);
    sphere.enabled = true;

    if let Ok(mut entity_commands) = commands.get_entity(weapon_entity) {
        entity_commands
            .remove::<Attachment>()
            .insert((Hover::default(), Transform::from_translation(location)));
    }
}

/// System: покачивание предметов в состоянии Hovering
pub fn hover_items(time: Res<Time<Fixed>>, mut items: Query<(&Item, &mut Hover, &mut Transform)>) {
    let delta = time.delta_secs();

    for (item, mut hover, mut transform) in &mut items {
        let offset = hover.advance(delta);
        if item.state == ItemState::Hovering {
            transform.translation.y += offset;
        }
    }
}

/// System: begin/end overlap сфер подбора
pub fn detect_item_overlaps(
    mut items: Query<(Entity, &Transform, &mut PickupSphere), With<Item>>,
    receivers: Query<(Entity, &Transform, Option<&Hurtbox>), With<PickupReceiver>>,
    mut overlap_events: EventWriter<ItemOverlap>,
) {
    for (item, item_transform, mut sphere) in &mut items {
        if !sphere.enabled {
            continue;
        }

        let inside: Vec<Entity> = receivers
            .iter()
            .filter(|(_, transform, hurtbox)| {
                let actor_radius = hurtbox.map(|hurtbox| hurtbox.radius).unwrap_or(0.0);
                sphere_overlaps(item_transform.translation, sphere.radius, transform.translation, actor_radius)
            })
            .map(|(actor, _, _)| actor)
            .collect();

        for &actor in &sphere.overlapping {
            if !inside.contains(&actor) {
                overlap_events.write(ItemOverlap::Ended { item, actor });
            }
        }
        for &actor in &inside {
            if !sphere.overlapping.contains(&actor) {
                overlap_events.write(ItemOverlap::Began { item, actor });
            }
        }

        sphere.overlapping = inside;
    }
}

/// System: реакция на overlap
///
/// - Weapon: begin → overlapping item персонажа, end → сброс
/// - Treasure: gold += value, pickup sound, despawn
/// - Soul: souls += value, pickup effect + sound, despawn
///
/// Один предмет подбирается максимум одним актором (даже если overlap у нескольких в том же tick).
pub fn handle_item_overlaps(
    mut commands: Commands,
    mut overlap_events: EventReader<ItemOverlap>,
    items: Query<(&Item, &Transform)>,
    mut receivers: Query<(Option<&mut Attributes>, Option<&mut SlashCharacter>), With<PickupReceiver>>,
    mut hud: ResMut<HudOverlay>,
    mut effects: EventWriter<EffectRequest>,
) {
    let mut consumed: Vec<Entity> = Vec::new();

    for event in overlap_events.read() {
        match *event {
            ItemOverlap::Began { item, actor } => {
                if consumed.contains(&item) {
                    continue;
                }
                let Ok((item_data, item_transform)) = items.get(item) else {
                    continue;
                };
                let Ok((attributes, character)) = receivers.get_mut(actor) else {
                    continue;
                };
                let location = item_transform.translation;

                match item_data.kind {
                    ItemKind::Weapon => {
                        if let Some(mut character) = character {
                            character.set_overlapping_item(Some(item));
                        }
                    }
                    ItemKind::Treasure { gold } => {
                        let Some(mut attributes) = attributes else {
                            continue;
                        };
                        attributes.change_gold(gold);
                        if character.is_some() {
                            hud.coins = attributes.gold;
                        }
                        effects.write(EffectRequest::at(EffectCue::PickupSound, location));
                        consumed.push(item);
                        commands.entity(item).despawn();
                        crate::log(&format!("💰 {:?} picked up treasure {:?} (+{} gold)", actor, item, gold));
                    }
                    ItemKind::Soul { souls } => {
                        let Some(mut attributes) = attributes else {
                            continue;
                        };
                        attributes.change_souls(souls);
                        if character.is_some() {
                            hud.souls = attributes.souls;
                        }
                        effects.write(EffectRequest::at(EffectCue::PickupEffect, location));
                        effects.write(EffectRequest::at(EffectCue::PickupSound, location));
                        consumed.push(item);
                        commands.entity(item).despawn();
                        crate::log(&format!("👻 {:?} picked up soul {:?} (+{} souls)", actor, item, souls));
                    }
                }
            }
            ItemOverlap::Ended { item, actor } => {
                let Ok((_, Some(mut character))) = receivers.get_mut(actor) else {
                    continue;
                };
                if character.overlapping_item == Some(item) {
                    character.set_overlapping_item(None);
                }
            }
        }
    }
}
