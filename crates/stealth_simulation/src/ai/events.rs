//! AI Events — perception stimuli от хоста и уведомления о смене тревоги
//!
//! Perception service (внешний) → PerceptionEvent → handle_perception_events → AlertStateMachine

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Канал восприятия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum SenseKind {
    #[default]
    Sight,
    Hearing,
}

/// Один sensory stimulus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    pub sense: SenseKind,
    /// false = стимул потерян (например, цель вышла из конуса зрения)
    pub successfully_sensed: bool,
    /// Где стимул возник (для слуха — источник звука)
    pub location: Vec3,
}

impl Stimulus {
    pub fn sight(successfully_sensed: bool, location: Vec3) -> Self {
        Self {
            sense: SenseKind::Sight,
            successfully_sensed,
            location,
        }
    }

    pub fn hearing(successfully_sensed: bool, location: Vec3) -> Self {
        Self {
            sense: SenseKind::Hearing,
            successfully_sensed,
            location,
        }
    }
}

/// Perception update от внешнего сервиса
///
/// - observer: enemy entity с AlertStateMachine
/// - actor: кого заметили / услышали (может быть уже despawned)
#[derive(Event, Debug, Clone, Copy)]
pub struct PerceptionEvent {
    pub observer: Entity,
    pub actor: Entity,
    pub stimulus: Stimulus,
}

/// Смена уровня тревоги (для UI, звука, debug overlay)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AlertStateChanged {
    pub controller: Entity,
    pub from: crate::ai::AlertState,
    pub to: crate::ai::AlertState,
}
