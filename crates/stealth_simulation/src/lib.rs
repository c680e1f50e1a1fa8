//! Stealth Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 для stealth-action:
//! - ai: alert state machine врагов (perception → Neutral / Suspicious / Alert / Searching)
//! - movement: locomotion игрока (input → walk / run / crouch скорость → rapier controller)
//!
//! Perception, behavior tree, input и физика — сервисы хоста. Симуляция только
//! принимает их события и публикует результат в компоненты.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod config;
pub mod logger;
pub mod movement;
pub mod player;

// Re-export базовых типов для удобства
pub use ai::{
    spawn_guard, AlertBlackboard, AlertConfig, AlertPlugin, AlertState, AlertStateChanged,
    AlertStateMachine, AlertTimer, AlertTimers, PerceptionConfig, PerceptionEvent, SenseKind,
    Stimulus,
};
pub use config::{ConfigError, StealthConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use movement::{
    spawn_player, ControlRotation, JumpIntent, Locomotion, LocomotionInput, LocomotionPlugin,
    MovementIntent, MovementPolicy, MovementStance, TriggerEdge,
};
pub use player::Player;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// StealthConfig берётся из ресурса, если хост его вставил, иначе default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для таймеров и solver'а
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<StealthConfig>()
            .add_plugins((AlertPlugin, LocomotionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
