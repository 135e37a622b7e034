//! Stamina management система
//!
//! - Регенерация stamina каждый fixed tick (Attributes::stamina_regen_rate)
//! - Стоимость dodge живёт в Attributes::dodge_cost

use bevy::prelude::*;

use crate::components::Attributes;

/// Система: regenerate stamina для всех актеров
///
/// Работает в FixedUpdate для детерминизма. Мёртвые тоже регенерируют (ни на что не влияет).
pub fn regenerate_stamina(mut query: Query<&mut Attributes>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut attributes in query.iter_mut() {
        if attributes.stamina < attributes.max_stamina {
            attributes.regenerate(delta);
        }
    }
}
