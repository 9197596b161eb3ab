//! Card zones for a combatant: draw pile, discard pile, hand.
//!
//! ## Key Types
//!
//! - `Piles`: the three sequences with draw/play/discard operations
//! - `Hand`: inline small vector of cards
//!
//! The free functions operate on borrowed sequences for callers that keep
//! the piles elsewhere.

pub mod piles;

pub use piles::{draw_up_to, shuffle, take_from_hand, Hand, Piles};
