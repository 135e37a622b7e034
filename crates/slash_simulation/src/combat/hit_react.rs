//! Направленная реакция на удар
//!
//! θ = угол между плоским forward и плоским направлением на ударившего.
//! Знак: если cross(forward, to_hit).y > 0 — удар слева, θ отрицательный.
//! Секторы: [-45,45) → FromFront, [45,135) → FromRight, [-135,-45) → FromLeft, иначе FromBack.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Секция hit react montage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitReactSection {
    FromFront,
    FromLeft,
    FromRight,
    FromBack,
    /// Направленная реакция выключена
    Default,
}

impl HitReactSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitReactSection::FromFront => "FromFront",
            HitReactSection::FromLeft => "FromLeft",
            HitReactSection::FromRight => "FromRight",
            HitReactSection::FromBack => "FromBack",
            HitReactSection::Default => "Default",
        }
    }
}

/// Настройки реакции на удар (per-actor)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct HitReactConfig {
    pub directional: bool,
    pub play_sound: bool,
    pub spawn_particles: bool,
}

impl Default for HitReactConfig {
    fn default() -> Self {
        Self {
            directional: false,
            play_sound: true,
            spawn_particles: true,
        }
    }
}

/// Знаковый угол удара в градусах, диапазон [-180, 180]
pub fn hit_angle_degrees(forward: Vec3, location: Vec3, hitter_location: Vec3) -> f32 {
    let flat_forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let to_hit = Vec3::new(hitter_location.x - location.x, 0.0, hitter_location.z - location.z).normalize_or_zero();

    let cos_theta = flat_forward.dot(to_hit).clamp(-1.0, 1.0);
    let theta = cos_theta.acos().to_degrees();

    if flat_forward.cross(to_hit).y > 0.0 {
        -theta
    } else {
        theta
    }
}

pub fn section_for_angle(theta: f32) -> HitReactSection {
    if (-45.0..45.0).contains(&theta) {
        HitReactSection::FromFront
    } else if (45.0..135.0).contains(&theta) {
        HitReactSection::FromRight
    } else if (-135.0..-45.0).contains(&theta) {
        HitReactSection::FromLeft
    } else {
        HitReactSection::FromBack
    }
}

pub fn hit_react_section(
    config: &HitReactConfig,
    forward: Vec3,
    location: Vec3,
    hitter_location: Vec3,
) -> HitReactSection {
    if !config.directional {
        return HitReactSection::Default;
    }
    section_for_angle(hit_angle_degrees(forward, location, hitter_location))
}
