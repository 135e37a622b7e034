//! Player character domain
//!
//! Содержит:
//! - SlashCharacter (ActionState / CharacterState + gates)
//! - PlayerInput (move, look, jump, pickup, attack, dodge)
//! - реакции на anim notifies, GetHit и смерть

use bevy::prelude::*;

pub mod input;
pub mod reactions;
pub mod slash_character;


// Re-export all components, events and systems
pub use input::*;
pub use reactions::*;
pub use slash_character::*;

use crate::combat::{process_deaths, process_get_hit};
use crate::SimulationSet;

/// Character Plugin
///
/// Порядок выполнения:
/// 1. Timers — сброс MovementInput
/// 2. Input — anim notifies, затем PlayerInput
/// 3. HitReaction — player_get_hit до базовой реакции
/// 4. Death — player_die после базовой смерти
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInput>().add_systems(
            FixedUpdate,
            (
                reset_movement_input.in_set(SimulationSet::Timers),
                (player_anim_notifies, handle_player_input)
                    .chain()
                    .in_set(SimulationSet::Input),
                player_get_hit
                    .in_set(SimulationSet::HitReaction)
                    .before(process_get_hit),
                player_die.in_set(SimulationSet::Death).after(process_deaths),
            ),
        );
    }
}
