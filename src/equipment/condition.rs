//! Card-matching conditions for equipment rules.
//!
//! A condition is checked against a single card. Numeric ranges use the
//! ace-high combat value; suit, color and rank compare directly.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color, Rank, Suit};

/// Predicate half of an equipment rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitCondition {
    /// Combat value in `[from, to]`, both inclusive.
    Range { from: u8, to: u8 },

    /// Exact suit.
    Suit(Suit),

    /// Either suit of a color.
    Color(Color),

    /// Exact rank.
    Rank(Rank),
}

impl HitCondition {
    /// Create a value range condition.
    #[must_use]
    pub const fn range(from: u8, to: u8) -> Self {
        Self::Range { from, to }
    }

    /// Does `card` satisfy this condition?
    #[must_use]
    pub fn matches(&self, card: Card) -> bool {
        match *self {
            HitCondition::Range { from, to } => (from..=to).contains(&card.value()),
            HitCondition::Suit(suit) => card.suit == suit,
            HitCondition::Color(color) => card.color() == color,
            HitCondition::Rank(rank) => card.rank == rank,
        }
    }
}

impl std::fmt::Display for HitCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HitCondition::Range { from, to } => write!(f, "value {from}..={to}"),
            HitCondition::Suit(suit) => write!(f, "suit {suit:?}"),
            HitCondition::Color(color) => write!(f, "color {color:?}"),
            HitCondition::Rank(rank) => write!(f, "rank {rank:?}"),
        }
    }
}
