//! # card-battle
//!
//! Turn-based card battle engine for a roguelike: standard playing-card
//! decks, weapons and armor that react to the card played, and an enemy
//! that picks its cards greedily.
//!
//! ## Design Principles
//!
//! 1. **One rule resolver**: weapons, armor and the enemy's card choice all
//!    go through `equipment::resolve`. First matching rule wins.
//!
//! 2. **State as a value**: `BattleState` is plain serializable data owned
//!    by the caller. Transitions are atomic; a rejected action leaves it
//!    untouched.
//!
//! 3. **Deterministic**: all shuffles come from a seeded `GameRng` whose
//!    state travels with the battle.
//!
//! ## Modules
//!
//! - `core`: RNG, errors, configuration, combatant stats
//! - `cards`: ranks, suits, value tables, standard deck
//! - `zones`: draw pile, discard pile and hand
//! - `equipment`: weapon/armor definitions, catalog, rule resolver
//! - `combat`: attack damage and armor mitigation
//! - `policy`: enemy discard and attack choices
//! - `battle`: the phase state machine
//! - `session`: profiles, storage seam and the battle service

pub mod core;
pub mod cards;
pub mod zones;
pub mod equipment;
pub mod combat;
pub mod policy;
pub mod battle;
pub mod session;

// Re-export commonly used types
pub use crate::core::{BattleConfig, BattleError, CombatantStats, GameRng, GameRngState, Result};

pub use crate::cards::{Card, Color, Rank, Suit};

pub use crate::zones::Piles;

pub use crate::equipment::{
    ArmorDef, Equipment, EquipmentId, EquipmentRegistry, HitCondition, HitEffect, Resolution, RuleEffect, WeaponDef,
};

pub use crate::combat::{attack_damage, mitigate, AttackDamage, Mitigation};

pub use crate::policy::{DiscardTactic, EnemyPolicy, GreedyPolicy};

pub use crate::battle::{
    BattleAction, BattleEngine, BattleOutcome, BattlePhase, BattleState, EnemyDefinition, PhaseReport,
    PlayerLoadout, Transition,
};

pub use crate::session::{BattleReport, BattleService, MemoryStore, PlayerProfile, SessionId, SessionStore};
