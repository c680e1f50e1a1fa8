//! Player control

mod player;

pub use player::Player;
