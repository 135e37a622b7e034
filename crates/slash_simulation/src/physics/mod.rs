//! Physics simulation module
//!
//! Kinematic locomotion: AI команды движения и ввод игрока → Transform.

use bevy::prelude::*;

pub mod movement;

// Re-export основных типов
pub use movement::{apply_movement_input, follow_movement_commands, step_towards, yaw_towards};

use crate::SimulationSet;

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (follow_movement_commands, apply_movement_input)
                .chain()
                .in_set(SimulationSet::Movement),
        );
    }
}
