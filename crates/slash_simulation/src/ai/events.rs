//! AI Events — восприятие врага
//!
//! PawnSensing система генерирует PawnSeen из Transform'ов (headless),
//! хост может прислать PawnSeen сам (например, из своего sight sense).

use bevy::prelude::*;

/// Наблюдатель увидел pawn'а
///
/// Обработчик (`enemy_on_pawn_seen`) сам решает, стоит ли цель внимания:
/// занятые враги и мёртвые/не-engageable pawn'ы игнорируются.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnSeen {
    /// Entity наблюдателя (у кого PawnSensing)
    pub observer: Entity,
    /// Кого увидели
    pub pawn: Entity,
}
