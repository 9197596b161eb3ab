//! Enemy decision policy.
//!
//! Policies are trait-based so encounters can swap in other behaviors:
//! - `EnemyPolicy`: discard step and attack-card selection
//! - `GreedyPolicy`: the default full-information greedy choice
//! - `DiscardTactic`: per-weapon static discard thresholds

mod enemy;
mod tactic;

pub use enemy::{best_card_index, lowest_card_index, preview, should_discard, DiscardDecision, EnemyPolicy, GreedyPolicy};
pub use tactic::{DiscardTactic, FACE_CARD_VALUE};
