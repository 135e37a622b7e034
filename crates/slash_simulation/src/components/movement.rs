//! Movement компоненты: команды AI движения, ввод, ориентация камеры

use bevy::prelude::*;

/// Команда движения для AI актора (выполняется navigation хоста)
///
/// Архитектура:
/// - ECS система пишет MovementCommand (high-level intent)
/// - Хост конвертирует в pathfinding target и применяет физику
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать текущий path)
    #[default]
    Idle,
    /// Идти к актору пока не окажемся в acceptance_radius
    MoveToActor {
        target: Entity,
        acceptance_radius: f32,
    },
    /// Остановиться немедленно (сбросить velocity)
    Stop,
}

impl MovementCommand {
    pub fn target(&self) -> Option<Entity> {
        match self {
            MovementCommand::MoveToActor { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Максимальная скорость ходьбы (units/sec)
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 125.0 }
    }
}

/// Вектор движения игрока/птицы за текущий tick (world space, не нормализован)
///
/// Сбрасывается в начале каждого tick, хост интегрирует.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInput {
    pub direction: Vec3,
}

/// Поворот контроллера (градусы): yaw вокруг Y, pitch вокруг X
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    /// Pitch не даём перевернуть камеру
    pub const PITCH_LIMIT: f32 = 89.0;

    pub fn add_input(&mut self, delta: Vec2) {
        self.yaw = (self.yaw + delta.x) % 360.0;
        self.pitch = (self.pitch + delta.y).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Forward/right по yaw (pitch игнорируем — ходим по земле)
    pub fn planar_axes(&self) -> (Vec3, Vec3) {
        let rotation = self.yaw_rotation();
        (rotation * Vec3::NEG_Z, rotation * Vec3::X)
    }
}

/// Поворачивать ли тело по направлению движения (выключается на смерти врага)
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrientToMovement(pub bool);

impl Default for OrientToMovement {
    fn default() -> Self {
        Self(true)
    }
}

/// Event: актор хочет прыгнуть (хост применяет impulse)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpIntent {
    pub entity: Entity,
}
