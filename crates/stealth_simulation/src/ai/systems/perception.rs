//! Perception systems (stimulus → AlertStateMachine, очистка despawned угроз).

use bevy::prelude::*;

use crate::ai::blackboard::{AlertBlackboard, NoBlackboard};
use crate::ai::events::{AlertStateChanged, PerceptionEvent};
use crate::ai::state_machine::{AlertEvent, AlertStateMachine, SensedActor, Transition};
use crate::ai::timers::AlertTimers;
use crate::player::Player;

/// Лог + AlertStateChanged на каждый реальный переход
pub(crate) fn report_transition(
    controller: Entity,
    transition: Transition,
    changes: &mut EventWriter<AlertStateChanged>,
) {
    crate::log_info(&format!(
        "🚨 {:?} STATE: {} (was {})",
        controller,
        transition.to.display_name(),
        transition.from.display_name()
    ));

    changes.write(AlertStateChanged {
        controller,
        from: transition.from,
        to: transition.to,
    });
}

/// Система: PerceptionEvent → AlertStateMachine
///
/// Актор разрешается в SensedActor через Transform (позиция) и Player (player-controlled).
/// Нет Transform / entity despawned → actor = None, событие отбрасывается машиной.
pub fn handle_perception_events(
    mut perception_events: EventReader<PerceptionEvent>,
    mut controllers: Query<(&mut AlertStateMachine, &mut AlertTimers, Option<&mut AlertBlackboard>)>,
    actors: Query<(&Transform, Has<Player>)>,
    mut changes: EventWriter<AlertStateChanged>,
) {
    for event in perception_events.read() {
        let Ok((mut machine, mut timers, blackboard)) = controllers.get_mut(event.observer) else {
            continue;
        };

        let actor = actors
            .get(event.actor)
            .ok()
            .map(|(transform, player_controlled)| SensedActor {
                entity: event.actor,
                location: transform.translation,
                player_controlled,
            });

        if !actor.is_some_and(|actor| actor.player_controlled) {
            crate::log(&format!(
                "👁️ {:?}: discarded {:?} stimulus from non-player {:?}",
                event.observer, event.stimulus.sense, event.actor
            ));
        }

        let alert_event = AlertEvent::Perceived {
            actor,
            stimulus: event.stimulus,
        };

        let transition = match blackboard {
            Some(mut blackboard) => machine.handle(alert_event, &mut *timers, &mut *blackboard),
            None => machine.handle(alert_event, &mut *timers, &mut NoBlackboard),
        };

        if let Some(transition) = transition {
            report_transition(event.observer, transition, &mut changes);
        }
    }
}

/// Система: threat actor despawned → как потеря из виду
///
/// Entity в ThreatRecord — слабая ссылка, perception не пришлёт "sight lost"
/// для удалённого актора.
pub fn forget_despawned_threats(
    mut controllers: Query<(Entity, &mut AlertStateMachine, &mut AlertTimers, Option<&mut AlertBlackboard>)>,
    live: Query<Entity>,
    mut changes: EventWriter<AlertStateChanged>,
) {
    for (controller, mut machine, mut timers, blackboard) in controllers.iter_mut() {
        let Some(threat) = machine.current_threat() else {
            continue;
        };

        if live.contains(threat) {
            continue;
        }

        crate::log(&format!("👻 {:?}: threat {:?} despawned", controller, threat));

        let transition = match blackboard {
            Some(mut blackboard) => machine.handle(AlertEvent::ThreatDespawned, &mut *timers, &mut *blackboard),
            None => machine.handle(AlertEvent::ThreatDespawned, &mut *timers, &mut NoBlackboard),
        };

        if let Some(transition) = transition {
            report_transition(controller, transition, &mut changes);
        }
    }
}
