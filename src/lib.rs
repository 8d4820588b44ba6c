//! # Chess Club
//!
//! A chess club tournament keeper: players, games, results, and a
//! Swiss-style round pairing engine.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tournaments, players, games)
//! - **scoring**: Result-to-points conventions, including the bye policy
//! - **storage**: Pluggable persistence behind the `Store` trait (memory, JSONL)
//! - **pairing**: The round pairing engine (standings → ranked order →
//!   greedy matcher → materialized round)
//! - **ranking**: Read-only ranking table derived from the same history
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod pairing;
pub mod ranking;
pub mod scoring;
pub mod storage;

pub use models::*;
