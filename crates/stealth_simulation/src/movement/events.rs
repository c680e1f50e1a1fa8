//! Movement events

use bevy::prelude::*;

/// Фронт кнопки (Started = нажата, Completed = отпущена)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Started,
    Completed,
}

/// Input action игрока (от внешней input подсистемы)
///
/// Применяется к entity с `Player`.
///
/// # Coordinate System
/// - `Move(v)`: `v.x` — вправо (+) / влево (-), `v.y` — вперёд (+) / назад (-)
/// - `Look(v)`: `v.x` — yaw delta, `v.y` — pitch delta (радианы)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum LocomotionInput {
    Move(Vec2),
    Look(Vec2),
    Run(TriggerEdge),
    Crouch(TriggerEdge),
    Jump(TriggerEdge),
}

/// Event: намерение прыгнуть (jump intent)
///
/// Генерируется на Jump Started, обрабатывается movement solver'ом хоста
/// (проверка is_on_floor и jump velocity).
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}
