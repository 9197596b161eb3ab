//! Equipment rule resolution.
//!
//! `resolve_rules` is the only place a card is matched against equipment.
//! Weapon hits, armor mitigation and the enemy's card ranking all go
//! through it so the three can never disagree about a rule.

use serde::{Deserialize, Serialize};

use super::definition::{Equipment, EquipmentKind, HitEffect, RuleEffect};
use crate::cards::Card;

/// Multiplier reported for an instant kill when a plain number is needed
/// (ranking candidate cards). Damage math never multiplies by it.
pub const INSTANT_KILL_MULTIPLIER: f64 = 9999.0;

/// Outcome of matching a card against an equipment rule list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// Rule `rule` (declaration index) matched.
    Matched { rule: usize, effect: RuleEffect },

    /// No weapon rule matched: the attack misses.
    Miss,

    /// No armor rule matched: damage passes through unchanged.
    NoMitigation,
}

impl Resolution {
    /// The effect as a single multiplier.
    ///
    /// `Miss` is 0, `NoMitigation` is 1 and an instant kill is
    /// `INSTANT_KILL_MULTIPLIER`.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            Resolution::Matched { effect: RuleEffect::Multiplier(m), .. } => *m,
            Resolution::Matched { effect: RuleEffect::InstantKill, .. } => INSTANT_KILL_MULTIPLIER,
            Resolution::Miss => 0.0,
            Resolution::NoMitigation => 1.0,
        }
    }

    #[must_use]
    pub fn is_instant_kill(&self) -> bool {
        matches!(self, Resolution::Matched { effect: RuleEffect::InstantKill, .. })
    }

    /// Index of the matching rule, if any.
    #[must_use]
    pub fn rule(&self) -> Option<usize> {
        match self {
            Resolution::Matched { rule, .. } => Some(*rule),
            Resolution::Miss | Resolution::NoMitigation => None,
        }
    }
}

/// First-match-wins evaluation of `rules` against `card`.
#[must_use]
pub fn resolve_rules(rules: &[HitEffect], kind: EquipmentKind, card: Card) -> Resolution {
    rules
        .iter()
        .position(|rule| rule.condition.matches(card))
        .map(|rule| Resolution::Matched {
            rule,
            effect: rules[rule].effect,
        })
        .unwrap_or_else(|| kind.no_match())
}

/// Resolve a card against any equipment.
#[must_use]
pub fn resolve(equipment: &Equipment, card: Card) -> Resolution {
    resolve_rules(equipment.rules(), equipment.kind(), card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::equipment::{ArmorDef, HitCondition, WeaponDef};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn sword() -> Equipment {
        WeaponDef::new("sword", "Sword")
            .with_rule(HitEffect::multiplier(HitCondition::range(5, 14), 1.0))
            .into()
    }

    #[test]
    fn test_weapon_hit_and_miss() {
        let sword = sword();
        assert_eq!(
            resolve(&sword, card("7h")),
            Resolution::Matched { rule: 0, effect: RuleEffect::Multiplier(1.0) }
        );
        assert_eq!(resolve(&sword, card("3h")), Resolution::Miss);
        assert_eq!(resolve(&sword, card("3h")).multiplier(), 0.0);
    }

    #[test]
    fn test_armor_no_match_is_no_mitigation() {
        let chain: Equipment = ArmorDef::new("chain", "Chain")
            .with_rule(HitEffect::multiplier(HitCondition::range(9, 11), 0.5))
            .with_rule(HitEffect::multiplier(HitCondition::range(12, 13), 0.25))
            .into();

        assert_eq!(resolve(&chain, card("Qs")).multiplier(), 0.25);
        assert_eq!(resolve(&chain, card("10s")).multiplier(), 0.5);
        assert_eq!(resolve(&chain, card("2s")), Resolution::NoMitigation);
        assert_eq!(resolve(&chain, card("2s")).multiplier(), 1.0);
    }

    #[test]
    fn test_first_match_wins() {
        let red_first = WeaponDef::new("a", "A")
            .with_rule(HitEffect::multiplier(HitCondition::Suit(Suit::Hearts), 2.0))
            .with_rule(HitEffect::multiplier(HitCondition::Rank(Rank::King), 3.0));
        let king_first = WeaponDef::new("b", "B")
            .with_rule(HitEffect::multiplier(HitCondition::Rank(Rank::King), 3.0))
            .with_rule(HitEffect::multiplier(HitCondition::Suit(Suit::Hearts), 2.0));

        assert_eq!(red_first.resolve(card("Kh")).multiplier(), 2.0);
        assert_eq!(king_first.resolve(card("Kh")).multiplier(), 3.0);
        assert_eq!(red_first.resolve(card("Kh")).rule(), Some(0));
    }

    #[test]
    fn test_instant_kill() {
        let axe = WeaponDef::new("axe", "Axe")
            .with_rule(HitEffect::new(HitCondition::Rank(Rank::Ace), RuleEffect::InstantKill));

        let res = axe.resolve(card("As"));
        assert!(res.is_instant_kill());
        assert_eq!(res.multiplier(), INSTANT_KILL_MULTIPLIER);
        assert!(!axe.resolve(card("Ks")).is_instant_kill());
    }
}
