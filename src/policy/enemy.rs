//! Enemy decision policy.
//!
//! The enemy sees only its own hand. Each turn it may cycle one card
//! (bounded by its craft stat) and then plays the card its weapon rates
//! highest. Both decisions are pure functions of hand, weapon and
//! discard budget: no randomness, no look-ahead.

use serde::{Deserialize, Serialize};

use super::tactic::{DiscardTactic, FACE_CARD_VALUE};
use crate::cards::Card;
use crate::equipment::{EquipmentKind, Resolution, WeaponDef};

/// Outcome of the discard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardDecision {
    pub discard: bool,
    pub index: Option<usize>,
}

impl DiscardDecision {
    pub const KEEP: DiscardDecision = DiscardDecision { discard: false, index: None };

    #[must_use]
    pub const fn discard(index: usize) -> Self {
        Self { discard: true, index: Some(index) }
    }
}

/// Decision-making seam for enemy turns.
pub trait EnemyPolicy: Send + Sync {
    /// Decide whether to discard before attacking, and which card.
    fn discard_choice(
        &self,
        hand: &[Card],
        weapon: Option<&WeaponDef>,
        craft: u32,
        discards_used: u32,
    ) -> DiscardDecision;

    /// Pick the hand index to attack with, or `None` for a certain miss.
    fn attack_choice(&self, hand: &[Card], weapon: Option<&WeaponDef>) -> Option<usize>;
}

/// The standard greedy policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl EnemyPolicy for GreedyPolicy {
    fn discard_choice(
        &self,
        hand: &[Card],
        weapon: Option<&WeaponDef>,
        craft: u32,
        discards_used: u32,
    ) -> DiscardDecision {
        should_discard(hand, weapon, craft, discards_used)
    }

    fn attack_choice(&self, hand: &[Card], weapon: Option<&WeaponDef>) -> Option<usize> {
        best_card_index(hand, weapon)
    }
}

fn rate(weapon: Option<&WeaponDef>, card: Card) -> f64 {
    weapon
        .map_or(EquipmentKind::Weapon.no_match(), |w| w.resolve(card))
        .multiplier()
}

/// Index of the lowest-value card; the earliest wins ties.
#[must_use]
pub fn lowest_card_index(hand: &[Card]) -> Option<usize> {
    hand.iter()
        .enumerate()
        .min_by_key(|(_, card)| card.value())
        .map(|(i, _)| i)
}

/// Discard step of an enemy turn.
///
/// Never discards once `discards_used >= craft`. Otherwise the lowest card
/// is the candidate and the weapon's `DiscardTactic` decides.
#[must_use]
pub fn should_discard(
    hand: &[Card],
    weapon: Option<&WeaponDef>,
    craft: u32,
    discards_used: u32,
) -> DiscardDecision {
    if discards_used >= craft {
        return DiscardDecision::KEEP;
    }
    let Some(lowest) = lowest_card_index(hand) else {
        return DiscardDecision::KEEP;
    };

    let tactic = weapon.map_or(DiscardTactic::FaceCard, |w| w.tactic);
    let trigger = match tactic {
        DiscardTactic::Melee { high_hit } => {
            !hand.iter().any(|&card| rate(weapon, card) >= high_hit)
        }
        DiscardTactic::Ranged { above } => hand[lowest].value() > above,
        DiscardTactic::FaceCard => hand[lowest].value() < FACE_CARD_VALUE,
    };

    if trigger {
        DiscardDecision::discard(lowest)
    } else {
        DiscardDecision::KEEP
    }
}

/// Attack-card selection.
///
/// Returns the index with the strictly highest weapon multiplier (earliest
/// on ties), or `None` when every card would miss.
#[must_use]
pub fn best_card_index(hand: &[Card], weapon: Option<&WeaponDef>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &card) in hand.iter().enumerate() {
        let score = rate(weapon, card);
        if score <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Resolution the chosen card will produce, for logging.
#[must_use]
pub fn preview(weapon: Option<&WeaponDef>, card: Card) -> Resolution {
    weapon.map_or(EquipmentKind::Weapon.no_match(), |w| w.resolve(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank};
    use crate::equipment::{HitCondition, HitEffect, RuleEffect};

    fn hand(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    fn king_and_nine(king: f64, nine: f64) -> WeaponDef {
        WeaponDef::new("k9", "K9")
            .with_rule(HitEffect::multiplier(HitCondition::Rank(Rank::King), king))
            .with_rule(HitEffect::multiplier(HitCondition::Rank(Rank::Nine), nine))
    }

    #[test]
    fn test_best_card_prefers_higher_multiplier() {
        let cards = hand("3c 9c Kc");
        assert_eq!(best_card_index(&cards, Some(&king_and_nine(2.0, 1.0))), Some(2));
        assert_eq!(best_card_index(&cards, Some(&king_and_nine(1.0, 2.0))), Some(1));
    }

    #[test]
    fn test_best_card_ties_go_to_first() {
        let cards = hand("3c 9c Kc");
        assert_eq!(best_card_index(&cards, Some(&king_and_nine(1.0, 1.0))), Some(1));
    }

    #[test]
    fn test_best_card_none_when_all_miss() {
        let cards = hand("3c 4c 5c");
        assert_eq!(best_card_index(&cards, Some(&king_and_nine(1.0, 1.0))), None);
        assert_eq!(best_card_index(&cards, None), None);
        assert_eq!(best_card_index(&[], Some(&king_and_nine(1.0, 1.0))), None);
    }

    #[test]
    fn test_instant_kill_outranks_multipliers() {
        let axe = WeaponDef::new("axe", "Axe")
            .with_rule(HitEffect::new(HitCondition::Rank(Rank::Ace), RuleEffect::InstantKill))
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 13), 5.0));
        assert_eq!(best_card_index(&hand("Kc As 2d"), Some(&axe)), Some(1));
    }

    #[test]
    fn test_discard_budget() {
        let cards = hand("2c 9d");
        assert_eq!(should_discard(&cards, None, 0, 0), DiscardDecision::KEEP);
        assert_eq!(should_discard(&cards, None, 2, 2), DiscardDecision::KEEP);
        assert_eq!(should_discard(&cards, None, 2, 1), DiscardDecision::discard(0));
    }

    #[test]
    fn test_face_card_tactic() {
        assert_eq!(should_discard(&hand("Qc 10d Kh"), None, 1, 0), DiscardDecision::discard(1));
        assert_eq!(should_discard(&hand("Qc Jd Kh"), None, 1, 0), DiscardDecision::KEEP);
    }

    #[test]
    fn test_melee_tactic() {
        let sword = king_and_nine(2.0, 1.0).with_tactic(DiscardTactic::Melee { high_hit: 2.0 });

        // A king in hand scores a big hit: keep everything.
        assert_eq!(should_discard(&hand("3c Kd 5h"), Some(&sword), 1, 0), DiscardDecision::KEEP);
        // No big hit available: cycle the lowest card.
        assert_eq!(
            should_discard(&hand("5c 9d 3h"), Some(&sword), 1, 0),
            DiscardDecision::discard(2)
        );
    }

    #[test]
    fn test_ranged_tactic() {
        let bow = WeaponDef::new("bow", "Bow")
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 6), 1.5))
            .with_tactic(DiscardTactic::Ranged { above: 7 });

        assert_eq!(should_discard(&hand("9c 8d Jh"), Some(&bow), 1, 0), DiscardDecision::discard(1));
        assert_eq!(should_discard(&hand("9c 4d Jh"), Some(&bow), 1, 0), DiscardDecision::KEEP);
    }

    #[test]
    fn test_empty_hand_never_discards() {
        assert_eq!(should_discard(&[], None, 3, 0), DiscardDecision::KEEP);
    }

    #[test]
    fn test_greedy_policy_delegates() {
        let policy = GreedyPolicy;
        let sword = king_and_nine(2.0, 1.0);
        let cards = hand("3c 9c Kc");

        assert_eq!(policy.attack_choice(&cards, Some(&sword)), Some(2));
        assert_eq!(
            policy.discard_choice(&cards, Some(&sword), 1, 0),
            should_discard(&cards, Some(&sword), 1, 0)
        );
        assert!(preview(Some(&sword), cards[2]).rule().is_some());
    }
}
