//! World props и pawns: breakables, bird

use bevy::prelude::*;

pub mod bird;
pub mod breakable;

pub use bird::*;
pub use breakable::*;

use crate::SimulationSet;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BirdInput>().add_systems(
            FixedUpdate,
            (
                bird_input.in_set(SimulationSet::Input),
                breakable_get_hit.in_set(SimulationSet::HitReaction),
            ),
        );
    }
}
