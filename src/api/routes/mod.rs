pub mod games;
pub mod players;
pub mod ranking;
pub mod rounds;
pub mod tournaments;
