//! Alert timers — one-shot таймеры Suspicious / Search.
//!
//! Отмена = handle в None (идемпотентно). Истёкший таймер сразу инвалидируется
//! и возвращается из `tick` ровно один раз.

use bevy::prelude::*;
use std::time::Duration;

/// Слот таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertTimer {
    Suspicious,
    Search,
}

/// Timer service: schedule-once + cancel-by-slot
pub trait TimerService {
    /// Перезапускает слот, если он уже активен
    fn set_timer(&mut self, timer: AlertTimer, duration: Duration);
    fn clear_timer(&mut self, timer: AlertTimer);
}

/// Таймеры alert controller'а (Bevy `Timer`, TimerMode::Once)
#[derive(Component, Debug, Clone, Default)]
pub struct AlertTimers {
    suspicious: Option<Timer>,
    search: Option<Timer>,
}

impl AlertTimers {
    fn slot(&self, timer: AlertTimer) -> &Option<Timer> {
        match timer {
            AlertTimer::Suspicious => &self.suspicious,
            AlertTimer::Search => &self.search,
        }
    }

    fn slot_mut(&mut self, timer: AlertTimer) -> &mut Option<Timer> {
        match timer {
            AlertTimer::Suspicious => &mut self.suspicious,
            AlertTimer::Search => &mut self.search,
        }
    }

    pub fn is_active(&self, timer: AlertTimer) -> bool {
        self.slot(timer).is_some()
    }

    /// Сколько осталось до срабатывания (None если слот не активен)
    pub fn remaining(&self, timer: AlertTimer) -> Option<Duration> {
        self.slot(timer).as_ref().map(Timer::remaining)
    }

    /// Продвигает оба таймера, возвращает истёкшие (Suspicious раньше Search)
    pub fn tick(&mut self, delta: Duration) -> Vec<AlertTimer> {
        let mut elapsed = Vec::new();

        for timer in [AlertTimer::Suspicious, AlertTimer::Search] {
            let slot = self.slot_mut(timer);
            let finished = match slot.as_mut() {
                Some(handle) => handle.tick(delta).finished(),
                None => false,
            };

            if finished {
                *slot = None;
                elapsed.push(timer);
            }
        }

        elapsed
    }
}

impl TimerService for AlertTimers {
    fn set_timer(&mut self, timer: AlertTimer, duration: Duration) {
        *self.slot_mut(timer) = Some(Timer::new(duration, TimerMode::Once));
    }

    fn clear_timer(&mut self, timer: AlertTimer) {
        *self.slot_mut(timer) = None;
    }
}
