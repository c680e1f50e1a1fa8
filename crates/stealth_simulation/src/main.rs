//! Headless сценарий: игрок пробегает мимо охранника
//!
//! Запуск: `stealth_simulation [config.json]`
//!
//! Перцепция здесь — простая замена движкового сервиса (конус зрения + шум бега),
//! Rapier не подключён, поэтому translation контроллера забирается и интегрируется
//! вручную (как это делает rapier character controller).

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::KinematicCharacterController;
use rand::Rng;

use stealth_simulation::movement::systems::apply_movement_intent;
use stealth_simulation::{
    create_headless_app, log_error, log_info, spawn_guard, spawn_player, AlertStateChanged,
    AlertStateMachine, DeterministicRng, Locomotion, LocomotionInput, PerceptionConfig, PerceptionEvent,
    Player, SimulationPlugin, StealthConfig, Stimulus, TriggerEdge,
};

const TICK_HZ: f64 = 60.0;
const SCENARIO_SECONDS: u32 = 30;
/// Шанс что бегущий игрок в радиусе слуха зашумит за тик
const NOISE_CHANCE_PER_TICK: f64 = 0.05;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match StealthConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                stealth_simulation::init_logger();
                log_error(&format!("{err}"));
                std::process::exit(1);
            }
        },
        None => StealthConfig::default(),
    };

    let seed = 42;
    println!("Starting stealth headless scenario (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / TICK_HZ)))
        .add_plugins(SimulationPlugin)
        .add_systems(Update, (scripted_player_input, log_alert_changes))
        .add_systems(
            FixedUpdate,
            (
                integrate_controller_translation.after(apply_movement_intent),
                scripted_perception,
            )
                .chain(),
        );

    let world = app.world_mut();
    let guard = spawn_guard(&mut world.commands(), &config, Vec3::ZERO);
    spawn_player(&mut world.commands(), &config, Vec3::new(-40.0, 0.0, -10.0));
    world.flush();

    let ticks = SCENARIO_SECONDS * TICK_HZ as u32;
    for tick in 0..ticks {
        app.update();

        if tick % (TICK_HZ as u32 * 5) == 0 {
            if let Some(machine) = app.world().get::<AlertStateMachine>(guard) {
                println!("t={:>4.1}s guard: {}", tick as f64 / TICK_HZ, machine.state().display_name());
            }
        }
    }

    println!("Scenario complete!");
}

/// Бежит вправо первые 3 секунды, дальше идёт шагом; на 4-й секунде прыгает
fn scripted_player_input(
    time: Res<Time>,
    mut inputs: EventWriter<LocomotionInput>,
    mut started: Local<bool>,
    mut walking: Local<bool>,
    mut jump: Local<Option<TriggerEdge>>,
) {
    if !*started {
        inputs.write(LocomotionInput::Run(TriggerEdge::Started));
        *started = true;
    }

    if !*walking && time.elapsed_secs() >= 3.0 {
        inputs.write(LocomotionInput::Run(TriggerEdge::Completed));
        *walking = true;
    }

    match *jump {
        None if time.elapsed_secs() >= 4.0 => {
            inputs.write(LocomotionInput::Jump(TriggerEdge::Started));
            *jump = Some(TriggerEdge::Started);
        }
        Some(TriggerEdge::Started) if time.elapsed_secs() >= 4.2 => {
            inputs.write(LocomotionInput::Jump(TriggerEdge::Completed));
            *jump = Some(TriggerEdge::Completed);
        }
        _ => {}
    }

    inputs.write(LocomotionInput::Move(Vec2::X));
}

/// Headless замена Rapier: забираем translation, position += translation
fn integrate_controller_translation(mut bodies: Query<(&mut KinematicCharacterController, &mut Transform)>) {
    for (mut controller, mut transform) in bodies.iter_mut() {
        if let Some(translation) = controller.translation.take() {
            transform.translation += translation;
        }
    }
}

/// Демо perception: конус зрения (gain/lose) + случайный шум бегущего игрока
fn scripted_perception(
    guards: Query<(Entity, &Transform, &PerceptionConfig)>,
    players: Query<(Entity, &Transform, &Locomotion), With<Player>>,
    mut perception: EventWriter<PerceptionEvent>,
    mut rng: ResMut<DeterministicRng>,
    mut last_seen: Local<HashMap<Entity, Vec3>>,
) {
    let Ok((player, player_transform, locomotion)) = players.single() else {
        return;
    };
    let target = player_transform.translation;

    for (guard, guard_transform, config) in guards.iter() {
        let observer = guard_transform.translation;
        let previous = last_seen.get(&guard).copied();
        let is_seen = config.can_see(observer, *guard_transform.forward(), target, previous);

        if is_seen {
            last_seen.insert(guard, target);
        } else {
            last_seen.remove(&guard);
        }

        if is_seen != previous.is_some() {
            perception.write(PerceptionEvent {
                observer: guard,
                actor: player,
                stimulus: Stimulus::sight(is_seen, target),
            });
        }

        if locomotion.running
            && config.can_hear(observer, target)
            && rng.rng.gen_bool(NOISE_CHANCE_PER_TICK)
        {
            perception.write(PerceptionEvent {
                observer: guard,
                actor: player,
                stimulus: Stimulus::hearing(true, target),
            });
        }
    }
}

fn log_alert_changes(mut changes: EventReader<AlertStateChanged>, time: Res<Time>) {
    for change in changes.read() {
        log_info(&format!(
            "t={:.2}s {:?}: {} → {}",
            time.elapsed_secs(),
            change.controller,
            change.from.display_name(),
            change.to.display_name()
        ));
    }
}
