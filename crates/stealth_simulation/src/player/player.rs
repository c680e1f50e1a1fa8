//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// - Alert AI: только акторы С этим компонентом считаются источником угрозы,
///   stimuli от остальных отбрасываются
/// - Locomotion: LocomotionInput применяется к entity С этим компонентом
///
/// # Single-player
/// Ровно один entity имеет этот компонент. Для possession:
/// ```ignore
/// commands.entity(old_actor).remove::<Player>();
/// commands.entity(new_actor).insert(Player);
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
