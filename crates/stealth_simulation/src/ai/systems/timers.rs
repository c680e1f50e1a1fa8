//! Timer systems (FixedUpdate): истёкшие alert таймеры → AlertStateMachine.

use bevy::prelude::*;

use crate::ai::blackboard::{AlertBlackboard, NoBlackboard};
use crate::ai::events::AlertStateChanged;
use crate::ai::state_machine::{AlertEvent, AlertStateMachine};
use crate::ai::timers::AlertTimers;

use super::perception::report_transition;

/// Система: tick alert таймеров фиксированным шагом
///
/// Истёкший слот уже инвалидирован в `AlertTimers::tick`, поэтому
/// переход в Neutral (который чистит оба слота) безопасен внутри цикла.
pub fn tick_alert_timers(
    mut controllers: Query<(Entity, &mut AlertStateMachine, &mut AlertTimers, Option<&mut AlertBlackboard>)>,
    mut changes: EventWriter<AlertStateChanged>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta();

    for (controller, mut machine, mut timers, mut blackboard) in controllers.iter_mut() {
        for elapsed in timers.tick(delta) {
            let event = AlertEvent::TimerElapsed(elapsed);

            let transition = match blackboard.as_mut() {
                Some(blackboard) => machine.handle(event, &mut *timers, &mut **blackboard),
                None => machine.handle(event, &mut *timers, &mut NoBlackboard),
            };

            if let Some(transition) = transition {
                report_transition(controller, transition, &mut changes);
            }
        }
    }
}
