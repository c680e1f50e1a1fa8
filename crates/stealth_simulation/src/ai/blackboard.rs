//! Blackboard — key-value store, который читает behavior tree хоста.
//!
//! AlertStateMachine пишет сюда через trait `Blackboard`, а не напрямую в компонент:
//! так state machine тестируется без App и без behavior tree.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ai::AlertState;

/// Ключи, которые публикует alert controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlackboardKey {
    AlertState,
    ThreatActor,
    ThreatLocation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlackboardValue {
    /// Enum значение (AlertState::as_u8)
    Enum(u8),
    Object(Entity),
    Vector(Vec3),
}

/// Запись в blackboard
pub trait Blackboard {
    fn set_value(&mut self, key: BlackboardKey, value: BlackboardValue);
    fn clear_value(&mut self, key: BlackboardKey);
}

/// Контроллер без blackboard: все записи отбрасываются
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlackboard;

impl Blackboard for NoBlackboard {
    fn set_value(&mut self, _key: BlackboardKey, _value: BlackboardValue) {}

    fn clear_value(&mut self, _key: BlackboardKey) {}
}

/// Blackboard компонент на enemy entity
///
/// `revision` растёт на каждую запись/очистку — behavior tree может
/// пропускать re-evaluation если revision не изменился.
#[derive(Component, Debug, Clone, Default)]
pub struct AlertBlackboard {
    values: HashMap<BlackboardKey, BlackboardValue>,
    revision: u64,
}

impl AlertBlackboard {
    pub fn get(&self, key: BlackboardKey) -> Option<BlackboardValue> {
        self.values.get(&key).copied()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Декодирует опубликованный AlertState
    pub fn alert_state(&self) -> Option<AlertState> {
        match self.get(BlackboardKey::AlertState)? {
            BlackboardValue::Enum(0) => Some(AlertState::Neutral),
            BlackboardValue::Enum(1) => Some(AlertState::Suspicious),
            BlackboardValue::Enum(2) => Some(AlertState::Alert),
            BlackboardValue::Enum(3) => Some(AlertState::Searching),
            _ => None,
        }
    }

    pub fn threat_actor(&self) -> Option<Entity> {
        match self.get(BlackboardKey::ThreatActor)? {
            BlackboardValue::Object(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn threat_location(&self) -> Option<Vec3> {
        match self.get(BlackboardKey::ThreatLocation)? {
            BlackboardValue::Vector(location) => Some(location),
            _ => None,
        }
    }
}

impl Blackboard for AlertBlackboard {
    fn set_value(&mut self, key: BlackboardKey, value: BlackboardValue) {
        self.values.insert(key, value);
        self.revision += 1;
    }

    fn clear_value(&mut self, key: BlackboardKey) {
        self.values.remove(&key);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_state_roundtrip_through_enum_value() {
        let mut blackboard = AlertBlackboard::default();
        blackboard.set_value(
            BlackboardKey::AlertState,
            BlackboardValue::Enum(AlertState::Searching.as_u8()),
        );
        assert_eq!(blackboard.alert_state(), Some(AlertState::Searching));
    }

    #[test]
    fn test_clear_value_bumps_revision() {
        let mut blackboard = AlertBlackboard::default();
        blackboard.set_value(BlackboardKey::ThreatLocation, BlackboardValue::Vector(Vec3::X));
        blackboard.clear_value(BlackboardKey::ThreatLocation);

        assert_eq!(blackboard.threat_location(), None);
        assert_eq!(blackboard.revision(), 2);
    }

    #[test]
    fn test_typed_getter_rejects_wrong_value_kind() {
        let mut blackboard = AlertBlackboard::default();
        blackboard.set_value(BlackboardKey::ThreatActor, BlackboardValue::Vector(Vec3::ONE));
        assert_eq!(blackboard.threat_actor(), None);
    }
}
