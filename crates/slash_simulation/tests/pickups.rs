//! Integration тесты персонажа: подбор оружия, equip/unequip, breakables, treasure, dodge

use bevy::prelude::*;
use slash_simulation::components::{Attachment, Attributes, Equipment, Socket};
use slash_simulation::items::loot_bundle;
use slash_simulation::spawn::{breakable_bundle, player_bundle, weapon_bundle};
use slash_simulation::*;

#[derive(Resource, Default)]
struct RecordedEffects(Vec<EffectRequest>);

fn record_effects(mut reader: EventReader<EffectRequest>, mut recorded: ResMut<RecordedEffects>) {
    recorded.0.extend(reader.read().copied());
}

#[derive(Resource, Default)]
struct RecordedAnimations(Vec<AnimationCommand>);

fn record_animations(mut reader: EventReader<AnimationCommand>, mut recorded: ResMut<RecordedAnimations>) {
    recorded.0.extend(reader.read().cloned());
}

fn create_pickup_app() -> (App, GameConfig) {
    let config = GameConfig::default();
    let mut app = create_headless_app_with_config(config.clone());
    app.init_resource::<RecordedEffects>()
        .init_resource::<RecordedAnimations>()
        .add_systems(
            FixedUpdate,
            (record_effects, record_animations).after(SimulationSet::Presentation),
        );
    app.update();
    (app, config)
}

fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

fn character(app: &App, player: Entity) -> SlashCharacter {
    app.world()
        .get::<SlashCharacter>(player)
        .copied()
        .expect("slash character")
}

fn send_input(app: &mut App, player: Entity, action: InputAction) {
    app.world_mut().send_event(PlayerInput::new(player, action));
    app.update();
}

fn has_cue(app: &App, cue: EffectCue) -> bool {
    app.world()
        .resource::<RecordedEffects>()
        .0
        .iter()
        .any(|effect| effect.cue == cue)
}

#[test]
fn test_weapon_pickup_equip_and_unequip() {
    let (mut app, config) = create_pickup_app();
    let player = app.world_mut().spawn(player_bundle(&config, Vec3::ZERO)).id();
    let weapon = app
        .world_mut()
        .spawn(weapon_bundle(&config, Vec3::new(0.0, 0.0, -30.0)))
        .id();

    // Begin overlap → overlapping item
    tick(&mut app, 2);
    assert_eq!(character(&app, player).overlapping_item, Some(weapon));

    // Без оружия атаковать нельзя
    send_input(&mut app, player, InputAction::Attack);
    assert_eq!(character(&app, player).action_state, ActionState::Unoccupied);

    // Подбор: меч за спину, персонаж остаётся Unequipped
    send_input(&mut app, player, InputAction::Pickup);
    let state = character(&app, player);
    assert_eq!(state.character_state, CharacterState::Unequipped);
    assert_eq!(state.overlapping_item, None);
    assert_eq!(app.world().get::<Equipment>(player).expect("equipment").weapon, Some(weapon));
    assert_eq!(app.world().get::<Item>(weapon).expect("item").state, ItemState::Equipped);
    assert_eq!(app.world().get::<Weapon>(weapon).expect("weapon").owner, Some(player));
    assert_eq!(
        app.world().get::<Attachment>(weapon).copied(),
        Some(Attachment::new(player, Socket::SpineSocket))
    );
    assert!(has_cue(&app, EffectCue::EquipSound));

    // Снова Pickup без предмета рядом → достать меч (Equip секция)
    send_input(&mut app, player, InputAction::Pickup);
    assert_eq!(character(&app, player).action_state, ActionState::Equipping);
    let equip_played = app.world().resource::<RecordedAnimations>().0.iter().any(|command| {
        matches!(
            command,
            AnimationCommand::Play { entity, slot: MontageSlot::Equip, section: Some(section), .. }
                if *entity == player && section == "Equip"
        )
    });
    assert!(equip_played);

    // Во время Equipping ни атаки, ни движения
    send_input(&mut app, player, InputAction::Move(Vec2::Y));
    assert_eq!(app.world().get::<Transform>(player).expect("transform").translation, Vec3::ZERO);

    // Notify конца анимации: меч в правой руке
    app.world_mut().send_event(AnimNotify::EquipEnd {
        entity: player,
        equipped: true,
    });
    tick(&mut app, 1);
    let state = character(&app, player);
    assert_eq!(state.character_state, CharacterState::TwoHandWeapon);
    assert_eq!(state.action_state, ActionState::Unoccupied);
    assert_eq!(
        app.world().get::<Attachment>(weapon).copied(),
        Some(Attachment::new(player, Socket::RightHandSocket))
    );

    // И обратно за спину
    send_input(&mut app, player, InputAction::Pickup);
    assert_eq!(character(&app, player).action_state, ActionState::Equipping);
    app.world_mut().send_event(AnimNotify::EquipEnd {
        entity: player,
        equipped: false,
    });
    tick(&mut app, 1);
    assert_eq!(character(&app, player).character_state, CharacterState::Unequipped);
    assert_eq!(
        app.world().get::<Attachment>(weapon).copied(),
        Some(Attachment::new(player, Socket::SpineSocket))
    );
}

#[test]
fn test_breakable_drops_treasure_once() {
    let (mut app, config) = create_pickup_app();
    let player = app.world_mut().spawn(player_bundle(&config, Vec3::ZERO)).id();
    let weapon = app
        .world_mut()
        .spawn(weapon_bundle(&config, Vec3::new(0.0, 0.0, -30.0)))
        .id();
    let breakable = app
        .world_mut()
        .spawn(breakable_bundle(Vec3::new(0.0, 0.0, -80.0), vec![25]))
        .id();

    // Подобрать и достать меч
    tick(&mut app, 2);
    send_input(&mut app, player, InputAction::Pickup);
    send_input(&mut app, player, InputAction::Pickup);
    app.world_mut().send_event(AnimNotify::EquipEnd {
        entity: player,
        equipped: true,
    });
    tick(&mut app, 1);
    assert_eq!(app.world().get::<Equipment>(player).expect("equipment").weapon, Some(weapon));

    // Два swing'а подряд по вазе
    for _ in 0..2 {
        send_input(&mut app, player, InputAction::Attack);
        assert_eq!(character(&app, player).action_state, ActionState::Attacking);
        app.world_mut().send_event(AnimNotify::WeaponCollision {
            entity: player,
            enabled: true,
        });
        tick(&mut app, 3);
        app.world_mut().send_event(AnimNotify::WeaponCollision {
            entity: player,
            enabled: false,
        });
        app.world_mut().send_event(AnimNotify::AttackEnd { entity: player });
        tick(&mut app, 3);
    }

    assert!(app.world().get::<Breakable>(breakable).expect("breakable").broken);
    assert!(has_cue(&app, EffectCue::BreakSound));
    assert!(has_cue(&app, EffectCue::PickupSound));

    // Treasure заспавнился один раз над вазой и был сразу подобран
    let attributes = app.world().get::<Attributes>(player).copied().expect("attributes");
    assert_eq!(attributes.gold, 25);
    assert_eq!(app.world().resource::<HudOverlay>().coins, 25);

    let world = app.world_mut();
    let remaining_treasure = world
        .query::<&Item>()
        .iter(world)
        .filter(|item| matches!(item.kind, ItemKind::Treasure { .. }))
        .count();
    assert_eq!(remaining_treasure, 0);
}

#[test]
fn test_loot_pickup_updates_attributes_and_hud() {
    let (mut app, config) = create_pickup_app();
    let player = app.world_mut().spawn(player_bundle(&config, Vec3::ZERO)).id();
    let treasure = app
        .world_mut()
        .spawn(loot_bundle(LootKind::Treasure { gold: 10 }, Vec3::new(50.0, 0.0, 0.0)))
        .id();
    let soul = app
        .world_mut()
        .spawn(loot_bundle(LootKind::Soul { souls: 3 }, Vec3::new(-50.0, 0.0, 0.0)))
        .id();
    // Далеко — не подбирается
    let far_soul = app
        .world_mut()
        .spawn(loot_bundle(LootKind::Soul { souls: 100 }, Vec3::new(0.0, 0.0, 1000.0)))
        .id();

    tick(&mut app, 3);

    let attributes = app.world().get::<Attributes>(player).copied().expect("attributes");
    assert_eq!(attributes.gold, 10);
    assert_eq!(attributes.souls, 3);

    let hud = *app.world().resource::<HudOverlay>();
    assert_eq!(hud.coins, 10);
    assert_eq!(hud.souls, 3);

    assert!(app.world().get_entity(treasure).is_err());
    assert!(app.world().get_entity(soul).is_err());
    assert!(app.world().get_entity(far_soul).is_ok());
    assert!(has_cue(&app, EffectCue::PickupEffect));
}

#[test]
fn test_dodge_spends_and_regenerates_stamina() {
    let (mut app, config) = create_pickup_app();
    let player = app.world_mut().spawn(player_bundle(&config, Vec3::ZERO)).id();
    tick(&mut app, 1);

    send_input(&mut app, player, InputAction::Dodge);
    assert_eq!(character(&app, player).action_state, ActionState::Dodge);
    let stamina = app.world().get::<Attributes>(player).expect("attributes").stamina;
    assert!((stamina - 90.0).abs() < 1e-3);
    assert!((app.world().resource::<HudOverlay>().stamina_percent - 0.9).abs() < 1e-3);

    // Повторный dodge во время dodge игнорируется
    send_input(&mut app, player, InputAction::Dodge);
    assert!(app.world().get::<Attributes>(player).expect("attributes").stamina > 89.0);

    app.world_mut().send_event(AnimNotify::DodgeEnd { entity: player });
    tick(&mut app, 1);
    assert_eq!(character(&app, player).action_state, ActionState::Unoccupied);

    // 8/s regen → через 2 секунды снова полный запас
    tick(&mut app, 120);
    let attributes = app.world().get::<Attributes>(player).copied().expect("attributes");
    assert_eq!(attributes.stamina, attributes.max_stamina);
    assert_eq!(app.world().resource::<HudOverlay>().stamina_percent, 1.0);
}

#[test]
fn test_player_moves_relative_to_camera_yaw() {
    let (mut app, config) = create_pickup_app();
    let player = app.world_mut().spawn(player_bundle(&config, Vec3::ZERO)).id();
    tick(&mut app, 1);

    // Вперёд по камере (forward = -Z), 300 units/s
    for _ in 0..60 {
        app.world_mut().send_event(PlayerInput::new(player, InputAction::Move(Vec2::Y)));
        app.update();
    }

    let location = app.world().get::<Transform>(player).expect("transform").translation;
    assert!((location.z + 300.0).abs() < 1.0, "moved ~300 forward, got {:?}", location);
    assert!(location.x.abs() < 1e-3);

    // Без ввода стоим
    tick(&mut app, 10);
    let after = app.world().get::<Transform>(player).expect("transform").translation;
    assert_eq!(location, after);
}
