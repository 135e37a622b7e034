//! Outbound запросы звука/частиц (хост проигрывает по cue)

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCue {
    HitSound,
    HitParticles,
    /// Силовое поле на месте попадания оружия
    WeaponForceField,
    EquipSound,
    PickupSound,
    PickupEffect,
    BreakSound,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    pub cue: EffectCue,
    pub location: Vec3,
    pub source: Option<Entity>,
}

impl EffectRequest {
    pub fn at(cue: EffectCue, location: Vec3) -> Self {
        Self {
            cue,
            location,
            source: None,
        }
    }

    pub fn from_source(cue: EffectCue, location: Vec3, source: Entity) -> Self {
        Self {
            cue,
            location,
            source: Some(source),
        }
    }
}
