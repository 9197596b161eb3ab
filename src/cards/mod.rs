//! Card model.
//!
//! - `Card`: immutable `(Rank, Suit)` value
//! - `numeric_value` / `negative_value`: the rank value tables
//! - `standard_deck`: the 52-card starting deck

mod card;
mod deck;

pub use card::{negative_value, numeric_value, Card, Color, Rank, Suit};
pub use deck::{parse_cards, standard_deck};
