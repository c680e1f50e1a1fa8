//! Locomotion systems
//!
//! # Архитектура
//!
//! ```text
//! LocomotionInput (input подсистема хоста)
//!     ↓
//! process_locomotion_input (Update) — Locomotion / ControlRotation / MovementIntent
//! apply_jump_intents (Update) — JumpIntent → vertical_velocity
//!     ↓
//! latch_movement_input (перед fixed loop) — input кадра → frame_input
//!     ↓
//! apply_movement_intent (FixedUpdate, каждый тик) — += KinematicCharacterController.translation
//!     ↓
//! Rapier character controller (PostUpdate) — забирает translation и обнуляет его
//! ```
//!
//! Translation копится за все fixed тики кадра: 0, 1 или N тиков за кадр
//! дают перемещение пропорциональное прошедшему fixed времени.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput};

use super::components::{ControlRotation, Locomotion, MovementIntent, MovementStance};
use super::events::{JumpIntent, LocomotionInput, TriggerEdge};
use super::policy::MovementPolicy;
use crate::player::Player;

/// Порог "почти ноль" для input векторов (по каждой компоненте)
pub const INPUT_DEADZONE: f32 = 1e-4;

/// м/с²
pub const GRAVITY: f32 = 9.8;

pub fn is_nearly_zero(input: Vec2) -> bool {
    input.x.abs() <= INPUT_DEADZONE && input.y.abs() <= INPUT_DEADZONE
}

/// Система: начальная скорость при появлении Locomotion
pub fn initialize_movement_speed(
    mut added: Query<(&Locomotion, &MovementPolicy, &mut MovementIntent), Added<Locomotion>>,
) {
    for (locomotion, policy, mut intent) in added.iter_mut() {
        intent.max_speed = policy.select_speed(locomotion.is_crouched(), locomotion.running);
    }
}

/// Применяет один input action к компонентам игрока
///
/// Возвращает true если начат прыжок (нужен JumpIntent).
/// Без ControlRotation move/look игнорируются (нет контроллера).
pub fn apply_locomotion_input(
    input: LocomotionInput,
    locomotion: &mut Locomotion,
    policy: &MovementPolicy,
    intent: &mut MovementIntent,
    rotation: Option<&mut ControlRotation>,
) -> bool {
    match input {
        LocomotionInput::Move(axis) => {
            let Some(rotation) = rotation else {
                return false;
            };
            if is_nearly_zero(axis) {
                return false;
            }

            let (forward, right) = rotation.yaw_basis();
            intent.add_input(forward, axis.y);
            intent.add_input(right, axis.x);
            false
        }

        LocomotionInput::Look(axis) => {
            let Some(rotation) = rotation else {
                return false;
            };
            if is_nearly_zero(axis) {
                return false;
            }

            rotation.add_yaw(axis.x);
            rotation.add_pitch(axis.y);
            false
        }

        LocomotionInput::Run(edge) => {
            locomotion.running = edge == TriggerEdge::Started;
            update_movement_speed(locomotion, policy, intent);
            false
        }

        LocomotionInput::Crouch(edge) => {
            locomotion.stance = match edge {
                TriggerEdge::Started => MovementStance::Crouching,
                TriggerEdge::Completed => MovementStance::Standing,
            };
            update_movement_speed(locomotion, policy, intent);
            false
        }

        LocomotionInput::Jump(TriggerEdge::Started) => {
            intent.jump_held = true;
            true
        }

        LocomotionInput::Jump(TriggerEdge::Completed) => {
            intent.jump_held = false;
            false
        }
    }
}

fn update_movement_speed(locomotion: &Locomotion, policy: &MovementPolicy, intent: &mut MovementIntent) {
    intent.max_speed = policy.select_speed(locomotion.is_crouched(), locomotion.running);
}

/// Система: LocomotionInput → player компоненты
///
/// Query: With<Player> (single-player: ровно один player entity).
pub fn process_locomotion_input(
    mut input_events: EventReader<LocomotionInput>,
    mut jump_events: EventWriter<JumpIntent>,
    mut players: Query<
        (
            Entity,
            &mut Locomotion,
            &MovementPolicy,
            &mut MovementIntent,
            Option<&mut ControlRotation>,
        ),
        With<Player>,
    >,
) {
    // Guard: нет player entity — input отбрасывается, не копится
    let Ok((player, mut locomotion, policy, mut intent, mut rotation)) = players.single_mut() else {
        input_events.clear();
        return;
    };

    for input in input_events.read() {
        let jump_started = apply_locomotion_input(
            *input,
            &mut locomotion,
            policy,
            &mut intent,
            rotation.as_deref_mut(),
        );

        if jump_started {
            jump_events.write(JumpIntent { entity: player });
        }
    }
}

/// Система: JumpIntent → вертикальный импульс (только с земли)
pub fn apply_jump_intents(
    mut jump_events: EventReader<JumpIntent>,
    mut bodies: Query<(&MovementPolicy, &mut MovementIntent, Option<&KinematicCharacterControllerOutput>)>,
) {
    for jump in jump_events.read() {
        let Ok((policy, mut intent, output)) = bodies.get_mut(jump.entity) else {
            continue;
        };

        if !intent.is_grounded(output.map(|output| output.grounded)) {
            continue;
        }

        intent.vertical_velocity = policy.jump_speed;
        crate::log(&format!(
            "🦘 {:?}: jump! vertical velocity = {:.1} m/s",
            jump.entity, policy.jump_speed
        ));
    }
}

/// Система: input кадра фиксируется до fixed loop
///
/// Все fixed тики кадра применяют один и тот же input.
pub fn latch_movement_input(mut intents: Query<&mut MovementIntent>) {
    for mut intent in intents.iter_mut() {
        intent.latch_input();
    }
}

/// Горизонтальный шаг solver'а: input кадра → перемещение за `delta` секунд
pub fn solver_step(intent: &MovementIntent, delta: f32) -> Vec3 {
    intent.frame_input * intent.max_speed * delta
}

/// Вертикальный шаг: смещение по Y за `delta` секунд
///
/// `solver_grounded` — результат прошлого шага solver'а. Без него землёй
/// считается высота отрыва (плоский мир headless хоста).
pub fn vertical_step(intent: &mut MovementIntent, solver_grounded: Option<bool>, delta: f32) -> f32 {
    if intent.is_grounded(solver_grounded) {
        intent.vertical_velocity = 0.0;
        intent.air_height = 0.0;
        return 0.0;
    }

    intent.vertical_velocity -= GRAVITY * delta;
    let mut offset = intent.vertical_velocity * delta;

    if solver_grounded.is_none() && intent.air_height + offset <= 0.0 {
        // Приземление ровно на высоту отрыва
        offset = -intent.air_height;
        intent.vertical_velocity = 0.0;
        intent.air_height = 0.0;
    } else {
        intent.air_height += offset;
    }

    offset
}

/// Система: MovementIntent → Rapier KinematicCharacterController
///
/// Запускается каждым fixed тиком и ДОБАВЛЯЕТ шаг к translation: solver
/// забирает сумму за кадр и сам выставляет None.
/// Персонаж поворачивается по направлению горизонтального движения
/// (orient rotation to movement), pitch камеры не влияет.
pub fn apply_movement_intent(
    mut bodies: Query<(
        &mut MovementIntent,
        &mut KinematicCharacterController,
        &mut Transform,
        Option<&KinematicCharacterControllerOutput>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut intent, mut controller, mut transform, output) in bodies.iter_mut() {
        let horizontal = solver_step(&intent, delta);
        let vertical = vertical_step(&mut intent, output.map(|output| output.grounded), delta);
        let translation = horizontal + Vec3::Y * vertical;

        if translation == Vec3::ZERO {
            continue;
        }

        controller.translation = Some(controller.translation.unwrap_or_default() + translation);

        if horizontal.length_squared() > f32::EPSILON {
            transform.look_to(horizontal, Vec3::Y);
        }
    }
}
