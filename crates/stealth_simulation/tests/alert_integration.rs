//! Alert integration test
//!
//! Headless App + SimulationPlugin, время шагает ровно 1/60 сек за update.
//!
//! Проверяем:
//! - Сценарии Neutral → Suspicious → Neutral, Alert → Searching → Neutral
//! - Перезапуск search таймера слухом
//! - Фильтрацию non-player акторов и despawned угрозы
//! - Публикацию в AlertBlackboard и AlertStateChanged events

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use stealth_simulation::*;

const TICK_HZ: u32 = 60;

/// Helper: App со всеми plugins и детерминированным временем
fn create_alert_app() -> App {
    let mut app = create_headless_app(42);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / TICK_HZ as f64,
    )))
    .add_plugins(SimulationPlugin);

    // Первый update: delta = 0, инициализация времени
    app.update();
    app
}

fn spawn_guard_at_origin(app: &mut App) -> Entity {
    let config = StealthConfig::default();
    let guard = spawn_guard(&mut app.world_mut().commands(), &config, Vec3::ZERO);
    app.world_mut().flush();
    guard
}

fn spawn_player_at(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Transform::from_translation(position), Player))
        .id()
}

fn run_seconds(app: &mut App, seconds: f32) {
    let ticks = (seconds * TICK_HZ as f32).round() as u32;
    for _ in 0..ticks {
        app.update();
    }
}

fn perceive(app: &mut App, observer: Entity, actor: Entity, stimulus: Stimulus) {
    app.world_mut().send_event(PerceptionEvent {
        observer,
        actor,
        stimulus,
    });
    app.update();
}

fn state_of(app: &App, guard: Entity) -> AlertState {
    app.world()
        .get::<AlertStateMachine>(guard)
        .map(|machine| machine.state())
        .expect("guard has AlertStateMachine")
}

fn blackboard_of(app: &App, guard: Entity) -> &AlertBlackboard {
    app.world()
        .get::<AlertBlackboard>(guard)
        .expect("guard has AlertBlackboard")
}

fn drain_changes(app: &mut App) -> Vec<AlertStateChanged> {
    app.world_mut()
        .resource_mut::<Events<AlertStateChanged>>()
        .drain()
        .collect()
}

/// Test: слух в Neutral → Suspicious, через 6 сек тишины → Neutral
#[test]
fn test_hearing_then_suspicious_timeout() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, 20.0));
    let noise = Vec3::new(2.0, 0.0, 18.0);

    perceive(&mut app, guard, player, Stimulus::hearing(true, noise));

    assert_eq!(state_of(&app, guard), AlertState::Suspicious);
    assert_eq!(blackboard_of(&app, guard).alert_state(), Some(AlertState::Suspicious));
    assert_eq!(blackboard_of(&app, guard).threat_location(), Some(noise));

    run_seconds(&mut app, 5.5);
    assert_eq!(state_of(&app, guard), AlertState::Suspicious);

    run_seconds(&mut app, 1.0);
    assert_eq!(state_of(&app, guard), AlertState::Neutral);

    let blackboard = blackboard_of(&app, guard);
    assert_eq!(blackboard.alert_state(), Some(AlertState::Neutral));
    assert_eq!(blackboard.threat_location(), None);
    assert_eq!(blackboard.threat_actor(), None);
}

/// Test: зрение в Neutral → Alert, ThreatActor = player
#[test]
fn test_sight_goes_alert_and_records_threat() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player_position = Vec3::new(0.0, 0.0, -8.0);
    let player = spawn_player_at(&mut app, player_position);

    perceive(&mut app, guard, player, Stimulus::sight(true, player_position));

    assert_eq!(state_of(&app, guard), AlertState::Alert);
    let machine = app.world().get::<AlertStateMachine>(guard).expect("machine");
    assert_eq!(machine.current_threat(), Some(player));
    assert_eq!(machine.last_known_threat_location(), player_position);

    let blackboard = blackboard_of(&app, guard);
    assert_eq!(blackboard.threat_actor(), Some(player));
    assert_eq!(blackboard.threat_location(), Some(player_position));

    let changes = drain_changes(&mut app);
    assert_eq!(
        changes,
        vec![AlertStateChanged {
            controller: guard,
            from: AlertState::Neutral,
            to: AlertState::Alert,
        }]
    );
}

/// Test: зрение потеряно в Alert → Searching, через 10 сек → Neutral
#[test]
fn test_sight_lost_then_search_timeout() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player_position = Vec3::new(3.0, 0.0, -6.0);
    let player = spawn_player_at(&mut app, player_position);

    perceive(&mut app, guard, player, Stimulus::sight(true, player_position));
    perceive(&mut app, guard, player, Stimulus::sight(false, player_position));

    assert_eq!(state_of(&app, guard), AlertState::Searching);
    let blackboard = blackboard_of(&app, guard);
    assert_eq!(blackboard.threat_actor(), None);
    assert_eq!(blackboard.threat_location(), Some(player_position));
    assert!(app
        .world()
        .get::<AlertTimers>(guard)
        .is_some_and(|timers| timers.is_active(AlertTimer::Search)));

    run_seconds(&mut app, 9.5);
    assert_eq!(state_of(&app, guard), AlertState::Searching);

    run_seconds(&mut app, 1.0);
    assert_eq!(state_of(&app, guard), AlertState::Neutral);
}

/// Test: слух в Searching перезапускает search таймер
#[test]
fn test_hearing_while_searching_restarts_timer() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -5.0));

    perceive(&mut app, guard, player, Stimulus::sight(true, Vec3::ZERO));
    perceive(&mut app, guard, player, Stimulus::sight(false, Vec3::ZERO));
    assert_eq!(state_of(&app, guard), AlertState::Searching);

    run_seconds(&mut app, 6.0);
    perceive(&mut app, guard, player, Stimulus::hearing(true, Vec3::new(1.0, 0.0, 1.0)));

    // 12 сек после начала поиска — исходный таймер уже бы сработал
    run_seconds(&mut app, 6.0);
    assert_eq!(state_of(&app, guard), AlertState::Searching);

    // ~10 сек после последнего звука
    run_seconds(&mut app, 4.5);
    assert_eq!(state_of(&app, guard), AlertState::Neutral);
}

/// Test: stimuli от non-player акторов отбрасываются
#[test]
fn test_non_player_stimuli_are_ignored() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let other_guard = app
        .world_mut()
        .spawn(Transform::from_translation(Vec3::new(0.0, 0.0, -4.0)))
        .id();

    perceive(&mut app, guard, other_guard, Stimulus::sight(true, Vec3::ZERO));
    perceive(&mut app, guard, other_guard, Stimulus::hearing(true, Vec3::ZERO));

    assert_eq!(state_of(&app, guard), AlertState::Neutral);
    assert_eq!(blackboard_of(&app, guard).revision(), 0);
    assert!(drain_changes(&mut app).is_empty());
}

/// Test: stimulus от despawned актора отбрасывается
#[test]
fn test_stimulus_from_despawned_actor_is_ignored() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    app.world_mut().despawn(player);

    perceive(&mut app, guard, player, Stimulus::sight(true, Vec3::ZERO));

    assert_eq!(state_of(&app, guard), AlertState::Neutral);
}

/// Test: despawn угрозы в Alert → Searching
#[test]
fn test_despawned_threat_starts_search() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -3.0));

    perceive(&mut app, guard, player, Stimulus::sight(true, Vec3::ZERO));
    assert_eq!(state_of(&app, guard), AlertState::Alert);

    app.world_mut().despawn(player);
    app.update();

    assert_eq!(state_of(&app, guard), AlertState::Searching);
    assert_eq!(blackboard_of(&app, guard).threat_actor(), None);
}

/// Test: guard без blackboard работает, записи отбрасываются
#[test]
fn test_guard_without_blackboard() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    app.world_mut().entity_mut(guard).remove::<AlertBlackboard>();
    let player = spawn_player_at(&mut app, Vec3::ZERO);

    perceive(&mut app, guard, player, Stimulus::hearing(true, Vec3::ONE));
    assert_eq!(state_of(&app, guard), AlertState::Suspicious);

    run_seconds(&mut app, 6.5);
    assert_eq!(state_of(&app, guard), AlertState::Neutral);
}

/// Test: повторный sight в Alert не сбрасывает таймеры и не шлёт AlertStateChanged
#[test]
fn test_repeated_sight_in_alert_is_not_a_transition() {
    let mut app = create_alert_app();
    let guard = spawn_guard_at_origin(&mut app);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -2.0));

    perceive(&mut app, guard, player, Stimulus::sight(true, Vec3::ZERO));
    drain_changes(&mut app);

    app.world_mut()
        .entity_mut(player)
        .insert(Transform::from_translation(Vec3::new(1.0, 0.0, -2.0)));
    perceive(&mut app, guard, player, Stimulus::sight(true, Vec3::ZERO));

    assert_eq!(state_of(&app, guard), AlertState::Alert);
    assert!(drain_changes(&mut app).is_empty());
    // Позиция цели обновлена даже без перехода
    assert_eq!(
        blackboard_of(&app, guard).threat_location(),
        Some(Vec3::new(1.0, 0.0, -2.0))
    );
}

/// Test: тайминги из StealthConfig попадают в guard
#[test]
fn test_custom_config_timeouts() {
    let mut app = create_alert_app();
    let config = StealthConfig::from_json_str(r#"{ "alert": { "suspicious_timeout": 2.0 } }"#)
        .expect("valid config");
    let guard = spawn_guard(&mut app.world_mut().commands(), &config, Vec3::ZERO);
    app.world_mut().flush();
    let player = spawn_player_at(&mut app, Vec3::ZERO);

    perceive(&mut app, guard, player, Stimulus::hearing(true, Vec3::ONE));
    run_seconds(&mut app, 2.5);

    assert_eq!(state_of(&app, guard), AlertState::Neutral);
}
