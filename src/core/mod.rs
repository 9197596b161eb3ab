//! Core engine types: RNG, errors, configuration, combatant stats.
//!
//! Everything here is free of battle rules so the other modules can
//! share it without depending on each other.

pub mod rng;
pub mod error;
pub mod config;
pub mod stats;

pub use rng::{GameRng, GameRngState};
pub use error::{BattleError, Result};
pub use config::BattleConfig;
pub use stats::CombatantStats;
