//! Alert state machine (Neutral → Suspicious → Alert → Searching → Neutral)
//!
//! Чистая логика без ECS queries: таймеры и blackboard передаются параметрами,
//! поэтому переходы проверяются unit-тестами без App.
//!
//! Переходы:
//! - Neutral + слух → Suspicious (suspicious timer)
//! - любое + зрение (успех) → Alert (запоминаем угрозу)
//! - Alert + зрение потеряно → Searching (search timer, location сохраняется)
//! - Searching + слух → Searching (search timer перезапускается)
//! - Suspicious / Searching + таймер истёк → Neutral (угроза очищается)

use bevy::prelude::*;

use crate::ai::blackboard::{Blackboard, BlackboardKey, BlackboardValue};
use crate::ai::events::{SenseKind, Stimulus};
use crate::ai::timers::{AlertTimer, TimerService};
use crate::ai::{AlertConfig, AlertState, ThreatRecord};

/// Актор, от которого пришёл stimulus (разрешён хостом из Entity)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedActor {
    pub entity: Entity,
    /// Текущая позиция актора (для зрения пишется в ThreatLocation)
    pub location: Vec3,
    /// Только player-controlled pawns считаются источниками угрозы
    pub player_controlled: bool,
}

/// Вход state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertEvent {
    /// Perception update. `actor == None` — актор уже не существует
    Perceived {
        actor: Option<SensedActor>,
        stimulus: Stimulus,
    },
    TimerElapsed(AlertTimer),
    /// Запомненный threat actor despawned
    ThreatDespawned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AlertState,
    pub to: AlertState,
}

/// Alert controller врага
#[derive(Component, Debug, Clone, Default)]
pub struct AlertStateMachine {
    state: AlertState,
    threat: ThreatRecord,
    config: AlertConfig,
}

impl AlertStateMachine {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn threat(&self) -> &ThreatRecord {
        &self.threat
    }

    pub fn current_threat(&self) -> Option<Entity> {
        self.threat.actor
    }

    pub fn has_current_threat(&self) -> bool {
        self.threat.has_actor()
    }

    pub fn last_known_threat_location(&self) -> Vec3 {
        self.threat.last_known_location
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Единая точка входа для всех событий
    pub fn handle<T, B>(&mut self, event: AlertEvent, timers: &mut T, blackboard: &mut B) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        match event {
            AlertEvent::Perceived { actor, stimulus } => {
                self.on_perception_updated(actor, stimulus, timers, blackboard)
            }
            AlertEvent::TimerElapsed(AlertTimer::Suspicious) => {
                if self.state != AlertState::Suspicious {
                    return None;
                }
                self.set_alert_state(AlertState::Neutral, timers, blackboard)
            }
            AlertEvent::TimerElapsed(AlertTimer::Search) => {
                if self.state != AlertState::Searching {
                    return None;
                }
                self.set_alert_state(AlertState::Neutral, timers, blackboard)
            }
            AlertEvent::ThreatDespawned => self.on_sight_lost(timers, blackboard),
        }
    }

    /// Смена состояния
    ///
    /// Повторный вход в то же состояние — no-op (ни таймеров, ни blackboard).
    /// Иначе ОБА таймера очищаются всегда, затем запускается нужный.
    /// Alert без threat actor отклоняется (Alert ⇒ угроза известна).
    pub fn set_alert_state<T, B>(&mut self, new_state: AlertState, timers: &mut T, blackboard: &mut B) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        if self.state == new_state {
            return None;
        }

        if new_state == AlertState::Alert && !self.threat.has_actor() {
            crate::log_warning("Alert: refusing ALERT without a recorded threat actor");
            return None;
        }

        let from = self.state;
        self.state = new_state;

        timers.clear_timer(AlertTimer::Suspicious);
        timers.clear_timer(AlertTimer::Search);

        match new_state {
            AlertState::Suspicious => {
                timers.set_timer(AlertTimer::Suspicious, self.config.suspicious_duration());
            }
            AlertState::Searching => {
                timers.set_timer(AlertTimer::Search, self.config.search_duration());
            }
            AlertState::Neutral | AlertState::Alert => {}
        }

        blackboard.set_value(BlackboardKey::AlertState, BlackboardValue::Enum(new_state.as_u8()));

        if new_state == AlertState::Neutral {
            self.threat.clear();
            blackboard.clear_value(BlackboardKey::ThreatLocation);
            blackboard.clear_value(BlackboardKey::ThreatActor);
        }

        Some(Transition { from, to: new_state })
    }

    fn on_perception_updated<T, B>(
        &mut self,
        actor: Option<SensedActor>,
        stimulus: Stimulus,
        timers: &mut T,
        blackboard: &mut B,
    ) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        let actor = actor?;

        if !actor.player_controlled {
            return None;
        }

        match stimulus.sense {
            SenseKind::Sight => {
                if stimulus.successfully_sensed {
                    self.on_sight_sensed(actor, timers, blackboard)
                } else {
                    self.on_sight_lost(timers, blackboard)
                }
            }
            SenseKind::Hearing => {
                if stimulus.successfully_sensed {
                    self.on_heard(stimulus.location, timers, blackboard)
                } else {
                    None
                }
            }
        }
    }

    fn on_sight_sensed<T, B>(&mut self, actor: SensedActor, timers: &mut T, blackboard: &mut B) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        self.threat.actor = Some(actor.entity);
        self.threat.last_known_location = actor.location;

        let transition = self.set_alert_state(AlertState::Alert, timers, blackboard);

        // Пишем всегда: цель могла сместиться, даже если уже в Alert
        blackboard.set_value(BlackboardKey::ThreatActor, BlackboardValue::Object(actor.entity));
        blackboard.set_value(
            BlackboardKey::ThreatLocation,
            BlackboardValue::Vector(self.threat.last_known_location),
        );

        transition
    }

    fn on_sight_lost<T, B>(&mut self, timers: &mut T, blackboard: &mut B) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        self.threat.actor = None;

        let transition = if self.state == AlertState::Alert {
            self.set_alert_state(AlertState::Searching, timers, blackboard)
        } else {
            None
        };

        blackboard.clear_value(BlackboardKey::ThreatActor);

        transition
    }

    fn on_heard<T, B>(&mut self, location: Vec3, timers: &mut T, blackboard: &mut B) -> Option<Transition>
    where
        T: TimerService + ?Sized,
        B: Blackboard + ?Sized,
    {
        self.threat.last_known_location = location;
        blackboard.set_value(BlackboardKey::ThreatLocation, BlackboardValue::Vector(location));

        match self.state {
            AlertState::Neutral => self.set_alert_state(AlertState::Suspicious, timers, blackboard),
            AlertState::Searching => {
                timers.clear_timer(AlertTimer::Search);
                timers.set_timer(AlertTimer::Search, self.config.search_duration());
                None
            }
            AlertState::Suspicious | AlertState::Alert => None,
        }
    }
}
