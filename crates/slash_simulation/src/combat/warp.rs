//! Motion warp targets: куда подтянуть атакующего при swing

use bevy::prelude::*;

/// Дистанция, на которой атакующий останавливается перед целью
pub const DEFAULT_WARP_TARGET_DISTANCE: f32 = 75.0;

/// Outbound: цели motion warping для хоста (None — цели нет)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WarpTargets {
    pub translation: Option<Vec3>,
    pub rotation: Option<Vec3>,
}

impl WarpTargets {
    pub fn clear(&mut self) {
        self.translation = None;
        self.rotation = None;
    }
}

/// Точка на `offset` перед целью со стороны атакующего
pub fn translation_warp_target(me: Vec3, target: Vec3, offset: f32) -> Vec3 {
    target + (me - target).normalize_or_zero() * offset
}

pub fn warp_targets_for(me: Vec3, target: Option<Vec3>, offset: f32) -> WarpTargets {
    match target {
        Some(target) => WarpTargets {
            translation: Some(translation_warp_target(me, target, offset)),
            rotation: Some(target),
        },
        None => WarpTargets::default(),
    }
}
