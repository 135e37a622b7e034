//! Tests for Weapon component и sweep геометрии.

#[cfg(test)]
mod tests {
    use super::super::weapon::*;
    use crate::components::Faction;
    use bevy::prelude::*;

    fn candidate(index: u32, center: Vec3, faction: Faction) -> SweepCandidate {
        SweepCandidate {
            entity: Entity::from_raw(index),
            center,
            radius: 40.0,
            faction,
            receives_hits: true,
        }
    }

    #[test]
    fn test_register_hit_is_unique() {
        let mut weapon = Weapon::default();
        let target = Entity::from_raw(5);

        assert!(weapon.register_hit(target));
        assert!(!weapon.register_hit(target));
        assert_eq!(weapon.actors_hit_this_attack.len(), 1);
    }

    #[test]
    fn test_disable_clears_registry() {
        let mut weapon = Weapon::default();
        weapon.set_collision_enabled(true);
        weapon.register_hit(Entity::from_raw(5));

        weapon.set_collision_enabled(false);
        assert!(weapon.actors_hit_this_attack.is_empty());
        assert!(!weapon.collision_enabled);

        // Новый swing — тот же актор снова валиден
        weapon.set_collision_enabled(true);
        assert!(weapon.register_hit(Entity::from_raw(5)));
    }

    #[test]
    fn test_segment_sphere_fraction() {
        let start = Vec3::ZERO;
        let end = Vec3::new(0.0, 0.0, -100.0);

        // Центр прямо на отрезке посередине
        let fraction = segment_sphere_fraction(start, end, 5.0, Vec3::new(0.0, 0.0, -50.0), 10.0);
        assert_eq!(fraction, Some(0.5));

        // Сбоку на 14 — достаёт (5 + 10 = 15)
        assert!(segment_sphere_fraction(start, end, 5.0, Vec3::new(14.0, 0.0, -50.0), 10.0).is_some());

        // Сбоку на 16 — мимо
        assert!(segment_sphere_fraction(start, end, 5.0, Vec3::new(16.0, 0.0, -50.0), 10.0).is_none());
    }

    #[test]
    fn test_box_trace_first_hit_wins() {
        let start = Vec3::ZERO;
        let end = Vec3::new(0.0, 0.0, -200.0);
        let near = candidate(1, Vec3::new(0.0, 0.0, -60.0), Faction::Player);
        let far = candidate(2, Vec3::new(0.0, 0.0, -150.0), Faction::Player);

        let hit = box_trace(start, end, Vec3::splat(5.0), &[far, near], &[]).map(|hit| hit.entity);
        assert_eq!(hit, Some(near.entity));

        // Ближний в ignore → попадаем в дальний
        let hit = box_trace(start, end, Vec3::splat(5.0), &[far, near], &[near.entity]).map(|hit| hit.entity);
        assert_eq!(hit, Some(far.entity));
    }

    #[test]
    fn test_impact_point_on_hurtbox_surface() {
        let target = candidate(1, Vec3::new(30.0, 0.0, -50.0), Faction::Enemy);
        let hit = box_trace(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), Vec3::splat(5.0), &[target], &[]);

        let Some(hit) = hit else {
            panic!("expected a hit");
        };
        assert!(hit.impact_point.abs_diff_eq(Vec3::new(-10.0, 0.0, -50.0), 1e-4));
    }

    #[test]
    fn test_config_to_weapon() {
        let config = WeaponConfig {
            damage: 35.0,
            ..Default::default()
        };
        let weapon = config.to_weapon();

        assert_eq!(weapon.damage, 35.0);
        assert_eq!(weapon.sweep_radius(), 5.0);
        assert!(weapon.owner.is_none());
        assert!(!weapon.collision_enabled);
    }
}
