//! Enemy alert AI
//!
//! Perception-driven alert state machine: Neutral / Suspicious / Alert / Searching.
//! Perception, behavior tree и таймеры — внешние сервисы; здесь только логика
//! переходов и адаптеры к Bevy (events, Timer, blackboard component).

use bevy::prelude::*;

pub mod blackboard;
pub mod components;
pub mod events;
pub mod state_machine;
pub mod systems;
pub mod timers;


// Re-export основных типов
pub use blackboard::{AlertBlackboard, Blackboard, BlackboardKey, BlackboardValue, NoBlackboard};
pub use components::*;
pub use events::{AlertStateChanged, PerceptionEvent, SenseKind, Stimulus};
pub use state_machine::{AlertEvent, AlertStateMachine, SensedActor, Transition};
pub use timers::{AlertTimer, AlertTimers, TimerService};

use crate::config::StealthConfig;

/// Alert Plugin
///
/// Порядок выполнения:
/// 1. handle_perception_events (Update) — stimuli не теряются при 0 fixed тиков за кадр
/// 2. forget_despawned_threats (Update)
/// 3. tick_alert_timers (FixedUpdate) — детерминированный шаг времени
pub struct AlertPlugin;

impl Plugin for AlertPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PerceptionEvent>()
            .add_event::<AlertStateChanged>()
            .add_systems(
                Update,
                (
                    systems::handle_perception_events,
                    systems::forget_despawned_threats,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, systems::tick_alert_timers);
    }
}

/// Spawn врага с alert controller'ом
///
/// Blackboard добавляется всегда; хост без behavior tree может удалить компонент,
/// тогда записи просто отбрасываются.
pub fn spawn_guard(commands: &mut Commands, config: &StealthConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            AlertStateMachine::new(config.alert),
            AlertTimers::default(),
            AlertBlackboard::default(),
            config.perception,
        ))
        .id()
}
