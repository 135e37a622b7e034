//! Headless симуляция SLASH
//!
//! Демо-сцена: игрок и меч на земле рядом, враг на патруле, ваза с treasure, птица в небе.
//! Использование: `slash_simulation [config.toml]`

use bevy::prelude::*;
use slash_simulation::components::Attributes;
use slash_simulation::spawn::{
    bird_bundle, breakable_bundle, enemy_with_drop_bundle, patrol_marker_bundle, player_bundle, weapon_bundle,
};
use slash_simulation::{
    create_headless_app_with_config, log_error, log_info, EnemyBrain, GameConfig, HudOverlay, LootKind, Scheduler,
    SlashCharacter,
};

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                slash_simulation::init_logger();
                log_error(&format!("❌ {error}"));
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let seed = config.simulation.seed;
    let mut app = create_headless_app_with_config(config.clone());
    log_info(&format!("Starting SLASH headless simulation (seed: {})", seed));

    let world = app.world_mut();
    let markers = vec![
        world.spawn(patrol_marker_bundle(Vec3::new(0.0, 0.0, -600.0))).id(),
        world.spawn(patrol_marker_bundle(Vec3::new(600.0, 0.0, -600.0))).id(),
        world.spawn(patrol_marker_bundle(Vec3::new(600.0, 0.0, 0.0))).id(),
    ];
    world.spawn(player_bundle(&config, Vec3::ZERO));
    world.spawn(weapon_bundle(&config, Vec3::new(0.0, 0.0, -30.0)));
    world.spawn(enemy_with_drop_bundle(
        &config,
        Vec3::new(300.0, 0.0, -300.0),
        markers,
        LootKind::Soul { souls: 5 },
    ));
    world.spawn(breakable_bundle(Vec3::new(-200.0, 0.0, 0.0), vec![10, 25, 50]));
    world.spawn(bird_bundle(Vec3::new(0.0, 300.0, 200.0)));

    // 1000 тиков ≈ 16.7 секунд игрового времени
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let states: Vec<_> = world
                .query::<&EnemyBrain>()
                .iter(world)
                .map(|brain| brain.state)
                .collect();
            let hud = *world.resource::<HudOverlay>();
            let player_health = world
                .query_filtered::<&Attributes, With<SlashCharacter>>()
                .iter(world)
                .next()
                .map(|attributes| attributes.health);
            log_info(&format!(
                "Tick {}: {} entities, {} timers, enemies {:?}, hud {:?}, health {:?}",
                tick,
                world.entities().len(),
                world.resource::<Scheduler>().len(),
                states,
                hud,
                player_health
            ));
        }
    }

    log_info("Simulation complete!");
}
