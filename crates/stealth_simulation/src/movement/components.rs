//! Locomotion компоненты: стойка, поворот контроллера, накопленный movement input

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Поза персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum MovementStance {
    #[default]
    Standing,
    Crouching,
}

/// Состояние locomotion игрока (стойка + бег)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    pub stance: MovementStance,
    pub running: bool,
}

impl Locomotion {
    pub fn is_crouched(&self) -> bool {
        self.stance == MovementStance::Crouching
    }
}

/// Поворот контроллера (камеры), радианы
///
/// Pitch ограничен ±89° — без переворота камеры через зенит.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Горизонтальный базис (forward, right) только по yaw — pitch/roll не влияют
    ///
    /// Bevy: forward = -Z, right = +X при yaw = 0.
    pub fn yaw_basis(&self) -> (Vec3, Vec3) {
        let rotation = Quat::from_rotation_y(self.yaw);
        (rotation * Vec3::NEG_Z, rotation * Vec3::X)
    }
}

/// Запрос к movement solver'у
///
/// Input накапливается вкладами за кадр (Update). Перед fixed loop накопленное
/// фиксируется в `frame_input` и применяется каждым fixed тиком кадра.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    pub pending_input: Vec3,
    /// Input прошлого кадра (clamp до единичной длины), его читает solver adapter
    pub frame_input: Vec3,
    /// Текущая максимальная скорость (из MovementPolicy)
    pub max_speed: f32,
    /// Вертикальная скорость (м/с): jump impulse, дальше гравитация
    pub vertical_velocity: f32,
    /// Высота над точкой отрыва — земля для хоста без solver output
    pub air_height: f32,
    /// Кнопка прыжка удерживается
    ///
    /// Adapter прыгает по JumpIntent на фиксированной скорости; удержание читает
    /// хостовый solver, если у него jump height зависит от времени удержания.
    pub jump_held: bool,
}

impl MovementIntent {
    /// Один вклад: направление * масштаб
    pub fn add_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    /// Забирает накопленный input (clamp до единичной длины)
    pub fn consume_input(&mut self) -> Vec3 {
        let input = self.pending_input.clamp_length_max(1.0);
        self.pending_input = Vec3::ZERO;
        input
    }

    /// Input кадра → `frame_input` (pending очищается)
    pub fn latch_input(&mut self) {
        self.frame_input = self.consume_input();
    }

    /// На земле: не летим вверх и solver (или своя высота) говорит grounded
    pub fn is_grounded(&self, solver_grounded: Option<bool>) -> bool {
        self.vertical_velocity <= 0.0 && solver_grounded.unwrap_or(self.air_height <= 0.0)
    }
}
