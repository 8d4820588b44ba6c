//! Core data models for the tournament keeper.

mod game;
mod ids;
mod player;
mod tournament;

pub use game::*;
pub use ids::*;
pub use player::*;
pub use tournament::*;
