//! AI components

pub mod alert;
pub mod perception;


// Re-export all components
pub use alert::*;
pub use perception::*;
