//! HUD: health bar врага над головой + overlay игрока
//!
//! Симуляция только хранит данные; виджеты рисует хост.

use bevy::prelude::*;

use crate::character::SlashCharacter;
use crate::combat::DamageDealt;
use crate::components::Attributes;
use crate::SimulationSet;

/// Health bar над врагом (скрыт вне боя)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthBar {
    pub visible: bool,
    pub percent: f32,
}

impl Default for HealthBar {
    fn default() -> Self {
        Self {
            visible: false,
            percent: 1.0,
        }
    }
}

impl HealthBar {
    pub fn show(&mut self, percent: f32) {
        self.visible = true;
        self.percent = percent.clamp(0.0, 1.0);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Overlay игрока: полоски health/stamina, монеты, души
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HudOverlay {
    pub health_percent: f32,
    pub stamina_percent: f32,
    pub coins: i32,
    pub souls: i32,
}

impl Default for HudOverlay {
    fn default() -> Self {
        Self {
            health_percent: 1.0,
            stamina_percent: 1.0,
            coins: 0,
            souls: 0,
        }
    }
}

/// System: игрок заспавнился → overlay (1.0, 1.0, 0, 0)
pub fn init_hud(players: Query<(), Added<SlashCharacter>>, mut hud: ResMut<HudOverlay>) {
    if !players.is_empty() {
        *hud = HudOverlay::default();
    }
}

/// System: урон по игроку → health percent
pub fn hud_on_damage(
    mut dealt_events: EventReader<DamageDealt>,
    players: Query<&Attributes, With<SlashCharacter>>,
    mut hud: ResMut<HudOverlay>,
) {
    for event in dealt_events.read() {
        if let Ok(attributes) = players.get(event.target) {
            hud.health_percent = attributes.health_percent();
        }
    }
}

/// System: stamina каждый tick (+ монеты/души после подборов)
pub fn sync_hud(players: Query<&Attributes, With<SlashCharacter>>, mut hud: ResMut<HudOverlay>) {
    let Ok(attributes) = players.single() else {
        return;
    };

    let stamina_percent = attributes.stamina_percent();
    if hud.stamina_percent != stamina_percent {
        hud.stamina_percent = stamina_percent;
    }
    if hud.coins != attributes.gold || hud.souls != attributes.souls {
        hud.coins = attributes.gold;
        hud.souls = attributes.souls;
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudOverlay>().add_systems(
            FixedUpdate,
            (
                init_hud.in_set(SimulationSet::Input),
                hud_on_damage
                    .in_set(SimulationSet::Damage)
                    .after(crate::combat::apply_damage),
                sync_hud.in_set(SimulationSet::Presentation),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bar_show_hide() {
        let mut bar = HealthBar::default();
        assert!(!bar.visible);
        assert_eq!(bar.percent, 1.0);

        bar.show(0.4);
        assert!(bar.visible);
        assert_eq!(bar.percent, 0.4);

        bar.hide();
        assert!(!bar.visible);
        assert_eq!(bar.percent, 0.4);
    }
}
