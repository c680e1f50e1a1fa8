//! Movement domain — player locomotion
//!
//! Содержит:
//! - MovementPolicy (walk / run / crouch скорость)
//! - Locomotion, ControlRotation, MovementIntent (компоненты)
//! - LocomotionInput, JumpIntent (events)
//! - Rapier adapter (MovementIntent → KinematicCharacterController, jump + гравитация)

use bevy::prelude::*;
use bevy::app::RunFixedMainLoopSystem;
use bevy_rapier3d::prelude::{Collider, KinematicCharacterController, RigidBody};

pub mod components;
pub mod events;
pub mod policy;
pub mod systems;


// Re-export all components and events
pub use components::*;
pub use events::*;
pub use policy::MovementPolicy;

use crate::config::StealthConfig;
use crate::player::Player;

/// Locomotion Plugin
///
/// Input обрабатывается в Update (события не теряются между fixed тиками),
/// фиксируется перед fixed loop следующего кадра, solver adapter копит
/// translation в FixedUpdate. Rapier (PostUpdate) забирает сумму за кадр.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocomotionInput>()
            .add_event::<JumpIntent>()
            .add_systems(
                Update,
                (
                    systems::initialize_movement_speed,
                    systems::process_locomotion_input,
                    systems::apply_jump_intents,
                )
                    .chain(),
            )
            .add_systems(
                RunFixedMainLoop,
                systems::latch_movement_input.in_set(RunFixedMainLoopSystem::BeforeFixedMainLoop),
            )
            .add_systems(FixedUpdate, systems::apply_movement_intent);
    }
}

/// Spawn player персонажа (capsule 1.8м, kinematic controller)
pub fn spawn_player(commands: &mut Commands, config: &StealthConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            // Bevy transform
            Transform::from_translation(position),

            Player,
            Locomotion::default(),
            ControlRotation::default(),
            MovementIntent::default(),
            config.movement,

            // Rapier physics
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4),
            KinematicCharacterController::default(),
        ))
        .id()
}
