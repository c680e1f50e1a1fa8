//! Alert components (состояние тревоги, запись об угрозе, тайминги).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Уровень тревоги врага
///
/// Ровно одно активное состояние на контроллер. Не сохраняется между сессиями.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum AlertState {
    /// Спокоен, патруль (начальное состояние)
    #[default]
    Neutral,
    /// Что-то услышал, проверяет
    Suspicious,
    /// Видит игрока
    Alert,
    /// Потерял игрока из виду, ищет у последней известной позиции
    Searching,
}

impl AlertState {
    /// Имя для логов / debug overlay
    pub fn display_name(&self) -> &'static str {
        match self {
            AlertState::Neutral => "NEUTRAL",
            AlertState::Suspicious => "SUSPICIOUS",
            AlertState::Alert => "ALERT",
            AlertState::Searching => "SEARCHING",
        }
    }

    /// Цвет индикатора над головой, sRGB (green → yellow → red → orange)
    pub fn debug_color(&self) -> [u8; 3] {
        match self {
            AlertState::Neutral => [0, 255, 0],
            AlertState::Suspicious => [255, 255, 0],
            AlertState::Alert => [255, 0, 0],
            AlertState::Searching => [243, 156, 18],
        }
    }

    /// Стабильный числовой код (значение enum ключа в blackboard)
    pub fn as_u8(&self) -> u8 {
        match self {
            AlertState::Neutral => 0,
            AlertState::Suspicious => 1,
            AlertState::Alert => 2,
            AlertState::Searching => 3,
        }
    }
}

/// Последняя известная угроза
///
/// `actor` — слабая ссылка: Entity id не владеет жизнью актора,
/// актор может быть despawned в любой момент.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct ThreatRecord {
    pub actor: Option<Entity>,
    pub last_known_location: Vec3,
}

impl ThreatRecord {
    pub fn has_actor(&self) -> bool {
        self.actor.is_some()
    }

    pub fn clear(&mut self) {
        self.actor = None;
        self.last_known_location = Vec3::ZERO;
    }
}

/// Тайминги тревоги (секунды)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Suspicious → Neutral если ничего нового не услышали
    pub suspicious_timeout: f32,
    /// Searching → Neutral если игрок не найден
    pub search_duration: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            suspicious_timeout: 6.0,
            search_duration: 10.0,
        }
    }
}

impl AlertConfig {
    /// Невалидное значение (NaN, < 0) даёт нулевую длительность вместо паники
    pub fn suspicious_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.suspicious_timeout).unwrap_or(Duration::ZERO)
    }

    pub fn search_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.search_duration).unwrap_or(Duration::ZERO)
    }
}
