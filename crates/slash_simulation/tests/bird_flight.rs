//! Integration тесты bird pawn: полёт вдоль forward, поворот от control rotation

use bevy::prelude::*;
use slash_simulation::spawn::bird_bundle;
use slash_simulation::world::{bird_rotation, BirdAction};
use slash_simulation::*;

fn create_bird_app() -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.update();
    let bird = app.world_mut().spawn(bird_bundle(Vec3::ZERO)).id();
    app.update();
    (app, bird)
}

fn send_bird_input(app: &mut App, bird: Entity, action: BirdAction) {
    app.world_mut().send_event(BirdInput { entity: bird, action });
    app.update();
}

fn translation(app: &App, bird: Entity) -> Vec3 {
    app.world().get::<Transform>(bird).expect("transform").translation
}

#[test]
fn test_bird_without_input_stays() {
    let (mut app, bird) = create_bird_app();

    for _ in 0..30 {
        app.update();
    }
    assert_eq!(translation(&app, bird), Vec3::ZERO);

    // Нулевая ось — тоже без движения
    for _ in 0..30 {
        send_bird_input(&mut app, bird, BirdAction::Move(0.0));
    }
    assert_eq!(translation(&app, bird), Vec3::ZERO);
    assert_eq!(app.world().get::<Transform>(bird).expect("transform").rotation, Quat::IDENTITY);
}

#[test]
fn test_bird_moves_along_forward() {
    let (mut app, bird) = create_bird_app();
    let speed = app.world().get::<MovementSpeed>(bird).expect("speed").speed;

    // Одна секунда полёта вперёд (forward = -Z)
    for _ in 0..60 {
        send_bird_input(&mut app, bird, BirdAction::Move(1.0));
    }

    let location = translation(&app, bird);
    assert!((location.z + speed).abs() < 0.5, "flew ~{} forward, got {:?}", speed, location);
    assert!(location.x.abs() < 1e-3);
    assert!(location.y.abs() < 1e-3);

    // Ввод сбрасывается каждый tick: без Move птица висит на месте
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(translation(&app, bird), location);
}

#[test]
fn test_bird_look_rotates_and_redirects_flight() {
    let (mut app, bird) = create_bird_app();

    send_bird_input(&mut app, bird, BirdAction::Look(Vec2::new(45.0, 10.0)));
    send_bird_input(&mut app, bird, BirdAction::Look(Vec2::new(45.0, 20.0)));

    // Yaw/pitch накапливаются
    let control = *app.world().get::<ControlRotation>(bird).expect("control rotation");
    assert_eq!(control.yaw, 90.0);
    assert_eq!(control.pitch, 30.0);

    let rotation = app.world().get::<Transform>(bird).expect("transform").rotation;
    assert!(rotation.abs_diff_eq(bird_rotation(&control), 1e-5));
    // Look не двигает птицу
    assert_eq!(translation(&app, bird), Vec3::ZERO);

    let speed = app.world().get::<MovementSpeed>(bird).expect("speed").speed;
    for _ in 0..60 {
        send_bird_input(&mut app, bird, BirdAction::Move(1.0));
    }

    // Yaw 90 → влево (-X), pitch 30 → вверх
    let forward = rotation * Vec3::NEG_Z;
    let location = translation(&app, bird);
    assert!(location.x < 0.0 && location.y > 0.0, "got {:?}", location);
    assert!(location.abs_diff_eq(forward * speed, 0.5), "expected {:?}, got {:?}", forward * speed, location);
}

#[test]
fn test_bird_pitch_is_clamped() {
    let (mut app, bird) = create_bird_app();

    send_bird_input(&mut app, bird, BirdAction::Look(Vec2::new(0.0, 200.0)));

    let control = *app.world().get::<ControlRotation>(bird).expect("control rotation");
    assert_eq!(control.pitch, ControlRotation::PITCH_LIMIT);
    let rotation = app.world().get::<Transform>(bird).expect("transform").rotation;
    assert!(rotation.abs_diff_eq(bird_rotation(&control), 1e-5));
}
