//! Long Nardy rule engine: board model, entities, legal-move generation,
//! progress queries and run configuration.

pub mod board;
pub mod config;
pub mod entity;
pub mod progress;
pub mod rules;

pub use board::{normalize_p2, HolePosition, Seat};
pub use config::{Config, ConfigError};
pub use entity::{Checker, Die, Game, GameStatus, Move, Player, SessionKind};

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod progress_tests;
