//! Perception tuning для внешнего perception сервиса.
//!
//! Сами sense queries (line of sight, звук) делает хост. Здесь только параметры,
//! которые хост читает с enemy entity, и геометрические helpers для простых хостов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::events::SenseKind;

/// Параметры зрения (метры / градусы / секунды)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SightConfig {
    pub sight_radius: f32,
    /// Радиус потери цели (гистерезис: > sight_radius)
    pub lose_sight_radius: f32,
    /// Полный угол обзора
    pub peripheral_vision_angle_degrees: f32,
    /// Сколько секунд stimulus считается актуальным
    pub max_age: f32,
    /// Вокруг последней увиденной позиции цель видна автоматически
    pub auto_success_range_from_last_seen: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            sight_radius: 15.0,
            lose_sight_radius: 20.0,
            peripheral_vision_angle_degrees: 90.0,
            max_age: 5.0,
            auto_success_range_from_last_seen: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct HearingConfig {
    pub hearing_range: f32,
    pub max_age: f32,
}

impl Default for HearingConfig {
    fn default() -> Self {
        Self {
            hearing_range: 30.0,
            max_age: 3.0,
        }
    }
}

/// Какие аффилиации детектируются (союзников не замечаем)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionByAffiliation {
    pub detect_enemies: bool,
    pub detect_neutrals: bool,
    pub detect_friendlies: bool,
}

impl Default for DetectionByAffiliation {
    fn default() -> Self {
        Self {
            detect_enemies: true,
            detect_neutrals: true,
            detect_friendlies: false,
        }
    }
}

/// Perception параметры врага
///
/// `max_age`, `affiliation`, `dominant_sense` читает perception сервис хоста;
/// геометрию зрения и слуха покрывают `can_see` / `can_hear`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PerceptionConfig {
    pub sight: SightConfig,
    pub hearing: HearingConfig,
    pub affiliation: DetectionByAffiliation,
    pub dominant_sense: SenseKind,
}

impl PerceptionConfig {
    /// Цель в радиусе и внутри конуса обзора
    ///
    /// `last_seen` — где цель была на прошлой успешной проверке (None = сейчас не видна):
    /// - гистерезис: замеченная цель теряется только за `lose_sight_radius`
    /// - в пределах `auto_success_range_from_last_seen` от этой точки цель видна
    ///   без проверки конуса (не теряем её, отвернувшись на шаг)
    pub fn can_see(&self, observer: Vec3, facing: Vec3, target: Vec3, last_seen: Option<Vec3>) -> bool {
        let to_target = target - observer;
        let distance = to_target.length();

        let radius = if last_seen.is_some() {
            self.sight.lose_sight_radius
        } else {
            self.sight.sight_radius
        };

        if distance > radius {
            return false;
        }

        if let Some(last_seen) = last_seen {
            if target.distance(last_seen) <= self.sight.auto_success_range_from_last_seen {
                return true;
            }
        }

        // Вплотную — видно всегда
        if distance <= f32::EPSILON {
            return true;
        }

        let Some(facing) = facing.try_normalize() else {
            return false;
        };

        let half_angle = (self.sight.peripheral_vision_angle_degrees * 0.5).to_radians();
        facing.angle_between(to_target / distance) <= half_angle
    }

    pub fn can_hear(&self, listener: Vec3, source: Vec3) -> bool {
        listener.distance(source) <= self.hearing.hearing_range
    }
}
