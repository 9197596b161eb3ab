//! Weapon-specific discard tactics.
//!
//! Each weapon carries a static tactic that tells an enemy when its
//! lowest card is worth cycling out. Tactics are data, never random.

use serde::{Deserialize, Serialize};

/// Face-card threshold used by the fallback tactic: jack and up stays.
pub const FACE_CARD_VALUE: u8 = 11;

/// When an enemy wielding a weapon discards its lowest card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardTactic {
    /// Discard the lowest card only if no card in hand would hit for at
    /// least `high_hit`.
    Melee { high_hit: f64 },

    /// Ranged weapons favor low cards: discard the lowest card only when
    /// even it is above `above`.
    Ranged { above: u8 },

    /// Discard the lowest card if it is below a face card.
    #[default]
    FaceCard,
}
