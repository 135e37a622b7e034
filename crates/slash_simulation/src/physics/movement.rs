//! Kinematic locomotion для акторов
//!
//! Архитектура:
//! - AI пишет MovementCommand (MoveToActor) → шаг к цели со скоростью MovementSpeed
//! - Игрок/птица пишут MovementInput → интеграция direction · speed · dt
//! - Без коллизий и гравитации (навигация и физика — на стороне хоста)
//!
//! Детерминизм: fixed timestep, только Transform математика.

use bevy::prelude::*;

use crate::components::{MovementCommand, MovementInput, MovementSpeed, OrientToMovement};

/// Поворот, при котором forward (-Z) смотрит вдоль `direction` (в плоскости XZ)
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let planar = Vec3::new(direction.x, 0.0, direction.z);
    if planar.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-planar.x, -planar.z)))
}

/// Шаг к цели по плоскости XZ, останавливаемся на acceptance_radius
///
/// Возвращает новую позицию и направление шага (None — уже на месте).
pub fn step_towards(me: Vec3, target: Vec3, acceptance_radius: f32, max_step: f32) -> (Vec3, Option<Vec3>) {
    let offset = Vec3::new(target.x - me.x, 0.0, target.z - me.z);
    let distance = offset.length();
    if distance <= acceptance_radius || max_step <= 0.0 {
        return (me, None);
    }

    let direction = offset / distance;
    let step = max_step.min(distance - acceptance_radius);
    (me + direction * step, Some(direction))
}

/// Система: MovementCommand::MoveToActor → шаг к цели
///
/// Исчезнувшая цель = стоим. Idle и Stop не двигают.
pub fn follow_movement_commands(
    time: Res<Time<Fixed>>,
    movers: Query<(Entity, &MovementCommand, &MovementSpeed, Option<&OrientToMovement>)>,
    mut transforms: Query<&mut Transform>,
) {
    let delta = time.delta_secs();

    for (entity, command, speed, orient) in &movers {
        let MovementCommand::MoveToActor {
            target,
            acceptance_radius,
        } = *command
        else {
            continue;
        };
        let Ok(target_location) = transforms.get(target).map(|transform| transform.translation) else {
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(entity) else {
            continue;
        };

        let (location, direction) =
            step_towards(transform.translation, target_location, acceptance_radius, speed.speed * delta);
        let Some(direction) = direction else {
            continue;
        };

        transform.translation = location;
        if orient.is_some_and(|orient| orient.0) {
            if let Some(rotation) = yaw_towards(direction) {
                transform.rotation = rotation;
            }
        }
    }
}

/// Система: MovementInput → перемещение (длина input ограничена 1)
pub fn apply_movement_input(
    time: Res<Time<Fixed>>,
    mut movers: Query<(&MovementInput, &MovementSpeed, Option<&OrientToMovement>, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (input, speed, orient, mut transform) in &mut movers {
        if input.direction.length_squared() <= f32::EPSILON {
            continue;
        }

        let direction = input.direction.clamp_length_max(1.0);
        transform.translation += direction * speed.speed * delta;

        if orient.is_some_and(|orient| orient.0) {
            if let Some(rotation) = yaw_towards(direction) {
                transform.rotation = rotation;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stops_at_acceptance_radius() {
        let (location, direction) = step_towards(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), 15.0, 500.0);

        assert!((location - Vec3::new(0.0, 0.0, -85.0)).length() < 1e-4);
        assert_eq!(direction, Some(Vec3::NEG_Z));
    }

    #[test]
    fn test_step_limited_by_speed() {
        let (location, _) = step_towards(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 15.0, 5.0);
        assert!((location - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_step_inside_radius_does_nothing() {
        let (location, direction) = step_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 15.0, 5.0);
        assert_eq!(location, Vec3::ZERO);
        assert!(direction.is_none());
    }

    #[test]
    fn test_yaw_towards_faces_direction() {
        let Some(rotation) = yaw_towards(Vec3::X) else {
            panic!("expected rotation");
        };
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);

        assert!(yaw_towards(Vec3::Y).is_none());
    }
}
