//! Flocking integration test
//!
//! Проверяем:
//! - Idle → Following по дистанции до лидера (+ highlight, SurvivorRecruited)
//! - Following survivor сближается с точкой позади лидера
//! - Idle separation расталкивает survivors даже без лидера
//! - Мёртвые survivors покидают FlockRegistry

use bevy::prelude::*;
use boids_simulation::ai::Highlight;
use boids_simulation::spawn::{player_bundle, survivor_bundle};
use boids_simulation::*;

/// Собранные за прогон SurvivorRecruited
#[derive(Resource, Default)]
struct Recruited(Vec<Entity>);

fn collect_recruited(mut recruited: ResMut<Recruited>, mut events: EventReader<SurvivorRecruited>) {
    recruited.0.extend(events.read().map(|event| event.survivor));
}

fn create_flock_app() -> App {
    let mut app = create_headless_app(42);
    app.init_resource::<Recruited>()
        .add_systems(FixedUpdate, collect_recruited.after(SimulationSet::Present));
    app
}

fn spawn_player_facing(app: &mut App, position: Vec3, facing: Vec3) -> Entity {
    let config = SimulationConfig::default();
    app.world_mut()
        .spawn(player_bundle(&config, position))
        .insert(Transform::from_translation(position).looking_to(facing, Vec3::Y))
        .id()
}

fn spawn_survivor_facing(app: &mut App, position: Vec3, facing: Vec3) -> Entity {
    let config = SimulationConfig::default();
    app.world_mut()
        .spawn(survivor_bundle(&config, position))
        .insert(Transform::from_translation(position).looking_to(facing, Vec3::Y))
        .id()
}

/// Первый update только запускает часы, каждый следующий = один тик
fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn position(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).expect("entity has Transform").translation
}

fn state(app: &App, entity: Entity) -> SurvivorState {
    *app.world().get::<SurvivorState>(entity).expect("survivor has SurvivorState")
}

#[test]
fn test_survivor_recruited_when_leader_in_range() {
    let mut app = create_flock_app();
    spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);
    let near = spawn_survivor_facing(&mut app, Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
    let far = spawn_survivor_facing(&mut app, Vec3::new(12.0, 0.0, 0.0), Vec3::Z);

    run_ticks(&mut app, 3);

    assert_eq!(state(&app, near), SurvivorState::Following);
    assert_eq!(state(&app, far), SurvivorState::Idle);

    assert!(!app.world().get::<Highlight>(near).unwrap().enabled, "highlight off while following");
    assert!(app.world().get::<Highlight>(far).unwrap().enabled, "highlight on while idle");

    let recruited = &app.world().resource::<Recruited>().0;
    assert_eq!(recruited, &vec![near], "recruitment reported exactly once");

    let registry = app.world().resource::<FlockRegistry>();
    assert!(registry.contains(near) && registry.contains(far));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_following_never_reverts_to_idle() {
    let mut app = create_flock_app();
    let player = spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);
    let survivor = spawn_survivor_facing(&mut app, Vec3::new(0.0, 0.0, -4.0), Vec3::Z);

    run_ticks(&mut app, 3);
    assert_eq!(state(&app, survivor), SurvivorState::Following);

    // Лидер убегает далеко — survivor остаётся в отряде
    app.world_mut().get_mut::<Transform>(player).unwrap().translation = Vec3::new(100.0, 0.0, 100.0);
    run_ticks(&mut app, 10);

    assert_eq!(state(&app, survivor), SurvivorState::Following);
    assert!(!app.world().get::<Highlight>(survivor).unwrap().enabled);
}

#[test]
fn test_following_survivor_closes_on_follow_point() {
    let mut app = create_flock_app();
    spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);

    // Лидер смотрит в +Z → точка следования (0, 0, -3)
    let start = Vec3::new(0.5, 0.0, -7.5);
    let survivor = spawn_survivor_facing(&mut app, start, Vec3::Z);
    app.world_mut()
        .entity_mut(survivor)
        .insert(boids_simulation::ai::SurvivorAIConfig { detection_range: 20.0 });

    let follow_point = Vec3::new(0.0, 0.0, -3.0);
    let initial_distance = start.distance(follow_point);

    run_ticks(&mut app, 31); // 0.5 секунды

    let current = position(&app, survivor);
    assert_eq!(state(&app, survivor), SurvivorState::Following);
    assert!(
        current.distance(follow_point) < initial_distance - 1.0,
        "survivor should approach the follow point: {:?} → {:?}",
        start,
        current
    );
    assert_eq!(current.y, start.y, "steering is planar");

    let forward = *app.world().get::<Transform>(survivor).unwrap().forward();
    assert!(forward.z > 0.9, "survivor faces the follow point, forward = {:?}", forward);
    assert!(forward.y.abs() < 1e-4);
}

#[test]
fn test_idle_survivors_push_apart() {
    let mut app = create_flock_app();
    spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);
    let a = spawn_survivor_facing(&mut app, Vec3::new(20.0, 0.0, 0.0), Vec3::Z);
    let b = spawn_survivor_facing(&mut app, Vec3::new(20.0, 0.0, 1.0), Vec3::Z);

    run_ticks(&mut app, 61);

    let gap = position(&app, a).distance(position(&app, b));
    assert!(gap > 1.4, "idle separation should spread survivors, gap = {}", gap);
    assert!(gap < 1.6, "idle separation stops near separation_distance, gap = {}", gap);

    // Раздвигаются вдоль Z, без поворота
    assert!(position(&app, a).z < 0.0 && position(&app, b).z > 1.0);
    let rotation = app.world().get::<Transform>(a).unwrap().rotation;
    let expected = Transform::default().looking_to(Vec3::Z, Vec3::Y).rotation;
    assert!(rotation.abs_diff_eq(expected, 1e-5), "idle survivors do not rotate");
    assert_eq!(state(&app, a), SurvivorState::Idle);
}

#[test]
fn test_lone_idle_survivor_stays_put() {
    let mut app = create_flock_app();
    spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);
    let start = Vec3::new(15.0, 1.02, -15.0);
    let survivor = spawn_survivor_facing(&mut app, start, Vec3::Z);

    run_ticks(&mut app, 60);

    assert_eq!(position(&app, survivor), start);
}

#[test]
fn test_missing_leader_keeps_idle_separation() {
    let mut app = create_flock_app();
    let a = spawn_survivor_facing(&mut app, Vec3::new(0.0, 0.0, 0.0), Vec3::Z);
    let b = spawn_survivor_facing(&mut app, Vec3::new(0.5, 0.0, 0.0), Vec3::Z);

    run_ticks(&mut app, 30);

    assert_eq!(*app.world().resource::<LeaderBinding>(), LeaderBinding::Missing);
    assert_eq!(state(&app, a), SurvivorState::Idle);
    assert!(position(&app, a).distance(position(&app, b)) > 0.5);
}

#[test]
fn test_dead_survivor_leaves_flock() {
    let mut app = create_flock_app();
    spawn_player_facing(&mut app, Vec3::ZERO, Vec3::Z);
    let survivor = spawn_survivor_facing(&mut app, Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
    let other = spawn_survivor_facing(&mut app, Vec3::new(15.0, 0.0, 0.0), Vec3::Z);

    run_ticks(&mut app, 3);
    assert!(app.world().resource::<FlockRegistry>().contains(survivor));

    app.world_mut().get_mut::<Health>(survivor).unwrap().current = 0;
    run_ticks(&mut app, 3);

    let registry = app.world().resource::<FlockRegistry>();
    assert!(!registry.contains(survivor));
    assert_eq!(registry.members(), &[other]);
    assert!(app.world().get_entity(survivor).is_err(), "corpse despawned (corpse_linger_secs = 0)");
}
