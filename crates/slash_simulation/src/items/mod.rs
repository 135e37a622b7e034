//! Items domain — оружие в мире, treasure, souls
//!
//! Содержит:
//! - Item / ItemState / ItemKind (что лежит в мире и что будет при подборе)
//! - PickupSphere + ItemOverlap (begin/end overlap с pickup receivers)
//! - Hover (покачивание лежащих предметов)
//! - bundles для спавна (weapon pickup, equipped weapon, loot)

use bevy::prelude::*;

pub mod item;
pub mod systems;

// Re-export all components and systems
pub use item::*;
pub use systems::*;

use crate::SimulationSet;

pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemOverlap>().add_systems(
            FixedUpdate,
            (hover_items, detect_item_overlaps, handle_item_overlaps)
                .chain()
                .in_set(SimulationSet::Items),
        );
    }
}
