//! Movement speed policy (walk / run / crouch)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Скорости движения (м/с)
///
/// Выбор: crouch важнее run; иначе run; иначе walk.
/// `jump_speed` — вертикальная скорость в момент отрыва.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementPolicy {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    pub jump_speed: f32,
}

impl Default for MovementPolicy {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            crouch_speed: 1.5,
            jump_speed: 4.2,
        }
    }
}

impl MovementPolicy {
    pub fn select_speed(&self, crouched: bool, running: bool) -> f32 {
        if crouched {
            self.crouch_speed
        } else if running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}
