//! Pawn sensing: конус зрения врага

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Зрение: радиус + половина угла конуса, опрос раз в sensing_interval
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PawnSensing {
    pub sight_radius: f32,
    /// Половина угла конуса (градусы)
    pub peripheral_vision_angle: f32,
    pub sensing_interval: f32,
    #[serde(skip)]
    pub since_last_sense: f32,
}

impl Default for PawnSensing {
    fn default() -> Self {
        Self {
            sight_radius: 4000.0,
            peripheral_vision_angle: 45.0,
            sensing_interval: 0.5,
            since_last_sense: 0.0,
        }
    }
}

impl PawnSensing {
    /// Накопить время; true когда пора опросить зрение
    pub fn tick(&mut self, delta: f32) -> bool {
        self.since_last_sense += delta;
        if self.since_last_sense >= self.sensing_interval {
            self.since_last_sense = 0.0;
            true
        } else {
            false
        }
    }

    pub fn can_see(&self, observer: &Transform, target: Vec3) -> bool {
        let to_target = target - observer.translation;
        let distance = to_target.length();
        if distance > self.sight_radius {
            return false;
        }
        if distance <= f32::EPSILON {
            return true;
        }

        let forward = observer.forward().as_vec3();
        let cos_angle = forward.dot(to_target / distance).clamp(-1.0, 1.0);
        cos_angle.acos().to_degrees() <= self.peripheral_vision_angle
    }
}
