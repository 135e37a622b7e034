//! Breakable props (вазы, ящики): ломаются от первого удара и роняют treasure

use bevy::prelude::*;
use rand::Rng;

use crate::combat::{EffectCue, EffectRequest, GetHit};
use crate::components::{HitReceiver, Hurtbox};
use crate::items::{loot_bundle, LootKind};
use crate::DeterministicRng;

/// Breakable prop
///
/// Урон не принимает (нет Attributes), реагирует только на GetHit.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Hurtbox, HitReceiver, Transform)]
pub struct Breakable {
    pub broken: bool,
    /// Таблица treasure: при поломке выбирается одно значение равномерно
    pub treasure_values: Vec<i32>,
    pub spawn_height: f32,
}

impl Default for Breakable {
    fn default() -> Self {
        Self {
            broken: false,
            treasure_values: Vec::new(),
            spawn_height: 50.0,
        }
    }
}

impl Breakable {
    pub fn with_treasure(treasure_values: Vec<i32>) -> Self {
        Self {
            treasure_values,
            ..Default::default()
        }
    }

    /// Первый удар ломает. Возвращает выбранный treasure (если таблица не пуста).
    /// Повторные удары → None и ничего не меняют.
    pub fn break_apart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Option<LootKind>> {
        if self.broken {
            return None;
        }
        self.broken = true;

        if self.treasure_values.is_empty() {
            return Some(None);
        }
        let gold = self.treasure_values[rng.gen_range(0..self.treasure_values.len())];
        Some(Some(LootKind::Treasure { gold }))
    }
}

/// System: GetHit по breakable → break sound + treasure над пропом
pub fn breakable_get_hit(
    mut commands: Commands,
    mut hit_events: EventReader<GetHit>,
    mut breakables: Query<(&mut Breakable, &Transform)>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<EffectRequest>,
) {
    for hit in hit_events.read() {
        let Ok((mut breakable, transform)) = breakables.get_mut(hit.target) else {
            continue;
        };
        let Some(loot) = breakable.break_apart(&mut rng.rng) else {
            continue;
        };

        effects.write(EffectRequest::at(EffectCue::BreakSound, hit.impact_point));

        if let Some(loot) = loot {
            let location = transform.translation + Vec3::Y * breakable.spawn_height;
            commands.spawn(loot_bundle(loot, location));
        }

        crate::log(&format!("💥 Breakable {:?} broken (loot: {:?})", hit.target, loot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_only_first_hit_breaks() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut breakable = Breakable::with_treasure(vec![10]);

        assert_eq!(
            breakable.break_apart(&mut rng),
            Some(Some(LootKind::Treasure { gold: 10 }))
        );
        assert!(breakable.broken);
        assert_eq!(breakable.break_apart(&mut rng), None);
    }

    #[test]
    fn test_empty_table_breaks_without_loot() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut breakable = Breakable::default();

        assert_eq!(breakable.break_apart(&mut rng), Some(None));
        assert!(breakable.broken);
    }

    #[test]
    fn test_loot_drawn_from_table() {
        let table = vec![5, 10, 25];
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut breakable = Breakable::with_treasure(table.clone());
            let Some(Some(LootKind::Treasure { gold })) = breakable.break_apart(&mut rng) else {
                panic!("expected treasure");
            };
            assert!(table.contains(&gold));
        }
    }
}
