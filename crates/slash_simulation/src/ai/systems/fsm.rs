//! FSM AI systems: tick, таймеры, конец атаки, warp targets.

use bevy::prelude::*;

use crate::ai::components::{EnemyBrain, EnemyConfig, EnemyState};
use crate::ai::enemy::{CombatCheck, EnemyParts};
use crate::combat::montage::play_random_section;
use crate::combat::warp::warp_targets_for;
use crate::combat::{AnimNotify, AnimationCommand, Dead, MontageSlot, Montages, WarpTargets};
use crate::scheduler::{ScheduledTask, Scheduler, TimerFired};
use crate::DeterministicRng;

/// System: tick врага
///
/// - state > Patrolling → check_combat_target
/// - иначе → check_patrol_target
///
/// Мёртвые пропускаются.
pub fn enemy_tick(
    mut enemies: Query<EnemyParts>,
    transforms: Query<&Transform>,
    mut rng: ResMut<DeterministicRng>,
    mut scheduler: ResMut<Scheduler>,
) {
    for mut parts in &mut enemies {
        if parts.brain.is_dead() {
            continue;
        }

        if parts.brain.state.in_combat() {
            let distance = parts.combat_target_distance(&transforms);
            let before = parts.brain.state;
            let check = parts.enemy().check_combat_target(distance, &mut scheduler);
            if check == CombatCheck::LostInterest && before != parts.brain.state {
                crate::log(&format!("🤷 Enemy {:?}: lost interest → {:?}", parts.entity, parts.brain.state));
            }
        } else {
            let distance = parts.patrol_target_distance(&transforms);
            parts.enemy().check_patrol_target(distance, &mut rng.rng, &mut scheduler);
        }
    }
}

/// System: сработавшие таймеры врага (пауза патруля, атака)
///
/// Handle сверяется со слотом в EnemyBrain: отменённый или перевзведённый
/// таймер не может сработать "за старый" arm.
pub fn enemy_timer_callbacks(
    mut fired_events: EventReader<TimerFired>,
    mut enemies: Query<(EnemyParts, &Montages)>,
    targets: Query<Has<Dead>>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationCommand>,
) {
    for fired in fired_events.read() {
        let Ok((mut parts, montages)) = enemies.get_mut(fired.entity) else {
            continue;
        };
        if parts.brain.is_dead() {
            continue;
        }

        match fired.task {
            ScheduledTask::PatrolPauseFinished => {
                if parts.brain.patrol_timer != Some(fired.handle) {
                    continue;
                }
                parts.brain.patrol_timer = None;
                if !parts.brain.state.in_combat() {
                    parts.enemy().patrol_pause_finished();
                }
            }
            ScheduledTask::EnemyAttack => {
                if parts.brain.attack_timer != Some(fired.handle) {
                    continue;
                }
                parts.brain.attack_timer = None;

                // Исчезнувшая цель не считается мёртвой: атака уйдёт в пустоту,
                // а AttackEnd → check_combat_target её потеряет
                let target_dead = parts
                    .brain
                    .combat_target
                    .is_some_and(|target| targets.get(target).unwrap_or(false));

                if parts.enemy().attack(target_dead) {
                    play_random_section(&mut rng.rng, parts.entity, montages, MontageSlot::Attack, &mut animations);
                    crate::log(&format!(
                        "🗡️ Enemy {:?} attacks {:?}",
                        parts.entity, parts.brain.combat_target
                    ));
                } else {
                    crate::log(&format!("🪦 Enemy {:?}: combat target is dead, attack aborted", parts.entity));
                }
            }
            ScheduledTask::LifeSpanExpired => {}
        }
    }
}

/// System: AnimNotify::AttackEnd → Idle + немедленный check_combat_target
pub fn enemy_attack_end(
    mut notifies: EventReader<AnimNotify>,
    mut enemies: Query<EnemyParts>,
    transforms: Query<&Transform>,
    mut scheduler: ResMut<Scheduler>,
) {
    for notify in notifies.read() {
        let AnimNotify::AttackEnd { entity } = *notify else {
            continue;
        };
        let Ok(mut parts) = enemies.get_mut(entity) else {
            continue;
        };
        if parts.brain.state == EnemyState::Dead {
            continue;
        }

        let distance = parts.combat_target_distance(&transforms);
        parts.enemy().attack_end(distance, &mut scheduler);
    }
}

/// System: motion warp targets к combat target
pub fn update_warp_targets(
    mut enemies: Query<(&Transform, &EnemyBrain, &EnemyConfig, &mut WarpTargets)>,
    transforms: Query<&Transform>,
) {
    for (transform, brain, config, mut warp) in &mut enemies {
        if brain.is_dead() {
            if *warp != WarpTargets::default() {
                warp.clear();
            }
            continue;
        }

        let target = brain
            .combat_target
            .and_then(|target| transforms.get(target).ok())
            .map(|target| target.translation);
        let targets = warp_targets_for(transform.translation, target, config.warp_target_offset);
        if *warp != targets {
            *warp = targets;
        }
    }
}
