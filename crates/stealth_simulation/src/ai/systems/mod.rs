//! AI systems (perception → alert state, alert timers)

pub mod perception;
pub mod timers;

// Re-export all systems
pub use perception::*;
pub use timers::*;
