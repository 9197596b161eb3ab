//! Battle state machine.
//!
//! One encounter runs `player-attack -> enemy-turn -> player-defend`
//! until one side reaches zero health. `BattleEngine` drives the phases;
//! `BattleState` is the serializable snapshot it works on.

pub mod phase;
pub mod state;
pub mod enemy;
pub mod action;
pub mod engine;

pub use phase::{BattleOutcome, BattlePhase, PhaseReport};
pub use state::{BattleState, PlayerLoadout, Side, TurnEvent, TurnRecord};
pub use enemy::{EnemyDefinition, ScaledEnemy};
pub use action::{BattleAction, EnemyTurnReport, Transition};
pub use engine::BattleEngine;
