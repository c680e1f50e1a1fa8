//! StealthConfig — тюнинг AI и locomotion (JSON, все поля опциональны)
//!
//! ```json
//! { "alert": { "suspicious_timeout": 4.0 }, "movement": { "run_speed": 7.5 } }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ai::{AlertConfig, PerceptionConfig};
use crate::movement::MovementPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StealthConfig {
    pub alert: AlertConfig,
    pub perception: PerceptionConfig,
    pub movement: MovementPolicy,
}

impl StealthConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("alert.suspicious_timeout", self.alert.suspicious_timeout)?;
        positive("alert.search_duration", self.alert.search_duration)?;

        let sight = &self.perception.sight;
        positive("perception.sight.sight_radius", sight.sight_radius)?;
        positive("perception.sight.lose_sight_radius", sight.lose_sight_radius)?;
        positive("perception.sight.max_age", sight.max_age)?;
        non_negative(
            "perception.sight.auto_success_range_from_last_seen",
            sight.auto_success_range_from_last_seen,
        )?;
        if sight.lose_sight_radius < sight.sight_radius {
            return Err(ConfigError::Invalid {
                field: "perception.sight.lose_sight_radius",
                reason: format!(
                    "{} is smaller than sight_radius {}",
                    sight.lose_sight_radius, sight.sight_radius
                ),
            });
        }

        let angle = sight.peripheral_vision_angle_degrees;
        if !angle.is_finite() || angle <= 0.0 || angle > 360.0 {
            return Err(ConfigError::Invalid {
                field: "perception.sight.peripheral_vision_angle_degrees",
                reason: format!("{angle} is outside (0, 360]"),
            });
        }

        positive("perception.hearing.hearing_range", self.perception.hearing.hearing_range)?;
        positive("perception.hearing.max_age", self.perception.hearing.max_age)?;

        positive("movement.walk_speed", self.movement.walk_speed)?;
        positive("movement.run_speed", self.movement.run_speed)?;
        positive("movement.crouch_speed", self.movement.crouch_speed)?;
        positive("movement.jump_speed", self.movement.jump_speed)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be a finite positive number"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be finite and not negative"),
        })
    }
}
