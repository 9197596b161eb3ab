//! Draw pile, discard pile and hand for one combatant.
//!
//! `Piles` owns all three sequences so a card can never be duplicated or
//! lost: every operation moves cards between them and
//! `total_cards()` stays constant for the whole encounter.
//!
//! - The draw pile is ordered; its top is the end of the `Vec`.
//! - The discard pile is ordered; newest discard last.
//! - The hand is a bag, indexed by position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{BattleError, GameRng, Result};

/// A combatant's hand. Hand limits are small, so it lives inline.
pub type Hand = SmallVec<[Card; 8]>;

/// Shuffle cards in place with an unbiased Fisher-Yates permutation.
///
/// Also used for top-level deck construction (new encounter, new run).
pub fn shuffle(cards: &mut [Card], rng: &mut GameRng) {
    rng.shuffle(cards);
}

/// Fill `hand` up to `limit` cards.
///
/// When the draw pile runs dry the whole discard pile is folded back in
/// and shuffled. When both piles are empty the draw stops early and the
/// hand stays short; that is a normal state, not an error.
///
/// Returns the cards drawn, in draw order.
pub fn draw_up_to(
    draw_pile: &mut Vec<Card>,
    discard_pile: &mut Vec<Card>,
    hand: &mut Hand,
    limit: usize,
    rng: &mut GameRng,
) -> Vec<Card> {
    let mut drawn = Vec::new();

    while hand.len() < limit {
        if draw_pile.is_empty() {
            if discard_pile.is_empty() {
                break;
            }
            draw_pile.append(discard_pile);
            shuffle(draw_pile, rng);
            tracing::debug!(cards = draw_pile.len(), "reshuffled discard pile into draw pile");
        }

        if let Some(card) = draw_pile.pop() {
            hand.push(card);
            drawn.push(card);
        }
    }

    drawn
}

/// Remove and return the card at `index` in `hand`.
pub fn take_from_hand(hand: &mut Hand, index: usize) -> Result<Card> {
    if index >= hand.len() {
        return Err(BattleError::InvalidIndex {
            index,
            len: hand.len(),
        });
    }
    Ok(hand.remove(index))
}

/// The three card sequences of one combatant.
///
/// ## Usage
///
/// ```
/// use card_battle::cards::standard_deck;
/// use card_battle::core::GameRng;
/// use card_battle::zones::Piles;
///
/// let mut rng = GameRng::new(42);
/// let mut piles = Piles::new(standard_deck(), &mut rng);
///
/// piles.draw_up_to(5, &mut rng);
/// assert_eq!(piles.hand().len(), 5);
///
/// let card = piles.play_card(0).unwrap();
/// assert_eq!(piles.discard_pile().last(), Some(&card));
/// assert_eq!(piles.total_cards(), 52);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    draw: Vec<Card>,
    discard: Vec<Card>,
    hand: Hand,
}

impl Piles {
    /// Shuffle `cards` into a fresh draw pile with an empty hand and discard.
    #[must_use]
    pub fn new(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        shuffle(&mut cards, rng);
        Self {
            draw: cards,
            discard: Vec::new(),
            hand: Hand::new(),
        }
    }

    /// Build piles from explicit sequences, keeping their order.
    #[must_use]
    pub fn from_parts(draw: Vec<Card>, discard: Vec<Card>, hand: impl IntoIterator<Item = Card>) -> Self {
        Self {
            draw,
            discard,
            hand: hand.into_iter().collect(),
        }
    }

    /// Draw until the hand holds `limit` cards or both piles are empty.
    pub fn draw_up_to(&mut self, limit: usize, rng: &mut GameRng) -> Vec<Card> {
        draw_up_to(&mut self.draw, &mut self.discard, &mut self.hand, limit, rng)
    }

    /// Play the card at `index`. The played card goes to the discard pile.
    pub fn play_card(&mut self, index: usize) -> Result<Card> {
        let card = take_from_hand(&mut self.hand, index)?;
        self.discard.push(card);
        Ok(card)
    }

    /// Discard the card at `index` without playing it.
    pub fn discard(&mut self, index: usize) -> Result<Card> {
        let card = take_from_hand(&mut self.hand, index)?;
        self.discard.push(card);
        Ok(card)
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle_draw_pile(&mut self, rng: &mut GameRng) {
        shuffle(&mut self.draw, rng);
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Draw pile, bottom first; the next card drawn is the last element.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// Cards across draw pile, discard pile and hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw.len() + self.discard.len() + self.hand.len()
    }
}
