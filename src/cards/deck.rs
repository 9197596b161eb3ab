//! Deck construction helpers.

use super::card::{Card, Rank, Suit};

/// A standard 52-card deck, clubs through spades, each two through ace.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Parse a whitespace- or comma-separated list of cards (`"Qh 10s 3c"`).
pub fn parse_cards(text: &str) -> crate::core::Result<Vec<Card>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|token| token.parse::<Card>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_deck_is_unique() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);

        let unique: FxHashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards("3c, 9d  Kh").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Three, Suit::Clubs),
                Card::new(Rank::Nine, Suit::Diamonds),
                Card::new(Rank::King, Suit::Hearts),
            ]
        );
        assert!(parse_cards("3c zz").is_err());
    }
}
