//! Perception: конус зрения → PawnSeen → combat target

use bevy::prelude::*;

use crate::ai::components::{EnemyBrain, PawnSensing};
use crate::ai::enemy::EnemyParts;
use crate::ai::events::PawnSeen;
use crate::combat::Dead;
use crate::components::{Actor, Engageable};
use crate::scheduler::Scheduler;

/// System: опрос PawnSensing раз в sensing_interval
///
/// Занятые (Chasing/Attacking/Engaged) и мёртвые враги не смотрят:
/// обработчик всё равно проигнорировал бы событие.
pub fn sense_pawns(
    time: Res<Time<Fixed>>,
    mut observers: Query<(Entity, &Transform, &mut PawnSensing, &EnemyBrain)>,
    pawns: Query<(Entity, &Transform), With<Actor>>,
    mut seen_events: EventWriter<PawnSeen>,
) {
    let delta = time.delta_secs();

    for (observer, transform, mut sensing, brain) in &mut observers {
        if !sensing.tick(delta) {
            continue;
        }
        if brain.is_dead() || brain.state.in_combat() {
            continue;
        }

        for (pawn, pawn_transform) in &pawns {
            if pawn == observer || !sensing.can_see(transform, pawn_transform.translation) {
                continue;
            }
            seen_events.write(PawnSeen { observer, pawn });
        }
    }
}

/// System: PawnSeen → set_combat_target (если pawn engageable и жив)
pub fn enemy_on_pawn_seen(
    mut seen_events: EventReader<PawnSeen>,
    mut enemies: Query<EnemyParts>,
    pawns: Query<(&Transform, Has<Engageable>, Has<Dead>)>,
    mut scheduler: ResMut<Scheduler>,
) {
    for event in seen_events.read() {
        let Ok(mut parts) = enemies.get_mut(event.observer) else {
            continue;
        };
        let Ok((pawn_transform, engageable, pawn_dead)) = pawns.get(event.pawn) else {
            continue;
        };

        let distance = parts.transform.translation.distance(pawn_transform.translation);
        if parts
            .enemy()
            .on_pawn_seen(event.pawn, engageable, pawn_dead, Some(distance), &mut scheduler)
        {
            crate::log(&format!(
                "👁️ Enemy {:?} spotted {:?} at {:.0} → {:?}",
                event.observer,
                event.pawn,
                distance,
                parts.brain.state
            ));
        }
    }
}
