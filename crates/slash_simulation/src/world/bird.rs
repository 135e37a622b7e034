//! Bird — летающий pawn: вперёд по forward, поворот от контроллера

use bevy::prelude::*;

use crate::components::{ControlRotation, MovementInput, MovementSpeed};

/// Bird pawn (yaw/pitch тела = control rotation, по движению не поворачивается)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(MovementInput, ControlRotation, MovementSpeed, Transform)]
pub struct Bird;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirdAction {
    /// Ось вперёд/назад
    Move(f32),
    /// x — yaw, y — pitch (градусы)
    Look(Vec2),
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BirdInput {
    pub entity: Entity,
    pub action: BirdAction,
}

/// Поворот тела птицы по control rotation
pub fn bird_rotation(control: &ControlRotation) -> Quat {
    Quat::from_euler(EulerRot::YXZ, control.yaw.to_radians(), control.pitch.to_radians(), 0.0)
}

/// System: BirdInput → MovementInput вдоль forward / ControlRotation
pub fn bird_input(
    mut inputs: EventReader<BirdInput>,
    mut birds: Query<(&mut MovementInput, &mut ControlRotation, &mut Transform), With<Bird>>,
) {
    for input in inputs.read() {
        let Ok((mut movement, mut control, mut transform)) = birds.get_mut(input.entity) else {
            continue;
        };

        match input.action {
            BirdAction::Move(value) => {
                movement.direction += transform.forward().as_vec3() * value;
            }
            BirdAction::Look(value) => {
                control.add_input(value);
                transform.rotation = bird_rotation(&control);
            }
        }
    }
}
