//! Card values: rank, suit, and the rank value tables.
//!
//! A card is identified by its `(rank, suit)` pair. Duplicates are normal:
//! decks start from a standard 52 and gain extra copies between encounters.

use serde::{Deserialize, Serialize};

use crate::core::{BattleError, Result};

/// Card rank, two through ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Combat value: 2..10 literal, J=11, Q=12, K=13, A=14.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Penalty value with the ace low: A=1, 2..10 literal, J=11, Q=12, K=13.
    #[must_use]
    pub const fn negative_value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            other => other.value(),
        }
    }

    /// Is this a jack, queen or king?
    #[must_use]
    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(BattleError::InvalidCard(format!("unknown rank {s:?}"))),
        };
        Ok(rank)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Hearts and diamonds are red; clubs and spades are black.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

impl std::str::FromStr for Suit {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "clubs" => Ok(Suit::Clubs),
            "d" | "diamonds" => Ok(Suit::Diamonds),
            "h" | "hearts" => Ok(Suit::Hearts),
            "s" | "spades" => Ok(Suit::Spades),
            _ => Err(BattleError::InvalidCard(format!("unknown suit {s:?}"))),
        }
    }
}

/// Suit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Black,
}

/// An immutable playing card.
///
/// ```
/// use card_battle::cards::{Card, Rank, Suit};
///
/// let queen: Card = "Qh".parse().unwrap();
/// assert_eq!(queen, Card::new(Rank::Queen, Suit::Hearts));
/// assert_eq!(queen.value(), 12);
/// assert_eq!(queen.to_string(), "Qh");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Combat value, ace high.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Penalty value, ace low.
    #[must_use]
    pub const fn negative_value(self) -> u8 {
        self.rank.negative_value()
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }
}

/// Combat value of a card (ace high = 14).
#[must_use]
pub fn numeric_value(card: Card) -> u8 {
    card.value()
}

/// Penalty value of a card (ace low = 1). Used by non-combat effects only.
#[must_use]
pub fn negative_value(card: Card) -> u8 {
    card.negative_value()
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl std::str::FromStr for Card {
    type Err = BattleError;

    /// Parse the short form: rank then suit letter (`"Qh"`, `"10s"`, `"Ts"`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(split) = s.char_indices().last().map(|(i, _)| i) else {
            return Err(BattleError::InvalidCard("empty card".to_string()));
        };
        if split == 0 {
            return Err(BattleError::InvalidCard(format!("card {s:?} is missing a rank")));
        }
        let (rank, suit) = s.split_at(split);
        Ok(Card::new(rank.parse()?, suit.parse()?))
    }
}
