//! Damage model: attack damage and armor mitigation.
//!
//! Both sides route every card check through the equipment resolver.
//! A missing weapon or armor (unowned, unknown, or simply none) is the
//! bare case: attacks miss and damage goes through unmitigated.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::BattleConfig;
use crate::equipment::{ArmorDef, EquipmentId, EquipmentKind, Resolution, WeaponDef};

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageTarget {
    pub max_health: i64,
    pub is_boss: bool,
}

/// Result of an attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackDamage {
    /// Damage dealt. Always `>= 0`; equal to the target's max health on
    /// an instant kill.
    pub raw: i64,
    /// The caller must set the target's health to zero.
    pub instant_kill: bool,
    pub resolution: Resolution,
}

impl AttackDamage {
    /// An attack made without a card: no rule can match.
    #[must_use]
    pub const fn miss() -> Self {
        Self {
            raw: 0,
            instant_kill: false,
            resolution: Resolution::Miss,
        }
    }

    #[must_use]
    pub fn is_miss(&self) -> bool {
        self.raw == 0 && !self.instant_kill
    }
}

/// Compute attack damage for `card` played with `weapon`.
///
/// `raw = floor(power * multiplier)`. An instant kill returns the
/// target's max health, except against a boss when the config keeps
/// bosses immune; then the hit uses `boss_instant_kill_multiplier`.
#[must_use]
pub fn attack_damage(
    power: i64,
    weapon: Option<&WeaponDef>,
    card: Card,
    target: DamageTarget,
    config: &BattleConfig,
) -> AttackDamage {
    let resolution = match weapon {
        Some(weapon) => weapon.resolve(card),
        None => EquipmentKind::Weapon.no_match(),
    };

    if resolution.is_instant_kill() {
        if target.is_boss && !config.instant_kill_bosses {
            return AttackDamage {
                raw: scaled(power, config.boss_instant_kill_multiplier),
                instant_kill: false,
                resolution,
            };
        }
        return AttackDamage {
            raw: target.max_health.max(0),
            instant_kill: true,
            resolution,
        };
    }

    AttackDamage {
        raw: scaled(power, resolution.multiplier()),
        instant_kill: false,
        resolution,
    }
}

fn scaled(power: i64, multiplier: f64) -> i64 {
    ((power as f64) * multiplier).floor().max(0.0) as i64
}

/// Result of the defend step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    /// Damage taken, in `[0, incoming]`.
    pub final_damage: i64,
    /// Damage prevented.
    pub reduced: i64,
    /// Armor whose rule decided the outcome, if any matched.
    pub armor_used: Option<EquipmentId>,
    pub resolution: Resolution,
}

impl Mitigation {
    /// Damage taken in full, as when there is no card to defend with.
    #[must_use]
    pub fn unmitigated(incoming: i64) -> Self {
        Self {
            final_damage: incoming.max(0),
            reduced: 0,
            armor_used: None,
            resolution: Resolution::NoMitigation,
        }
    }
}

/// Reduce `incoming` damage with the best of the equipped armors.
///
/// Every armor resolves the defend card; the lowest multiplier wins and
/// ties go to the earlier armor. `final = round(incoming * multiplier)`.
#[must_use]
pub fn mitigate(armors: &[&ArmorDef], card: Card, incoming: i64) -> Mitigation {
    let incoming = incoming.max(0);

    let best = armors
        .iter()
        .map(|armor| (*armor, armor.resolve(card)))
        .fold(None::<(&ArmorDef, Resolution)>, |best, (armor, res)| match best {
            Some((_, current)) if current.multiplier() <= res.multiplier() => best,
            _ => Some((armor, res)),
        });

    let (armor_used, resolution) = match best {
        Some((armor, res)) if res.rule().is_some() => (Some(armor.id.clone()), res),
        _ => (None, EquipmentKind::Armor.no_match()),
    };

    let final_damage = ((incoming as f64) * resolution.multiplier())
        .round()
        .clamp(0.0, incoming as f64) as i64;

    Mitigation {
        final_damage,
        reduced: incoming - final_damage,
        armor_used,
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::equipment::{HitCondition, HitEffect, RuleEffect};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn normal(max_health: i64) -> DamageTarget {
        DamageTarget { max_health, is_boss: false }
    }

    fn sword() -> WeaponDef {
        WeaponDef::new("sword", "Sword")
            .with_rule(HitEffect::multiplier(HitCondition::range(5, 14), 1.0))
    }

    fn chainmail() -> ArmorDef {
        ArmorDef::new("chainmail", "Chainmail")
            .with_rule(HitEffect::multiplier(HitCondition::range(9, 11), 0.5))
            .with_rule(HitEffect::multiplier(HitCondition::range(12, 13), 0.25))
    }

    #[test]
    fn test_hit_and_miss() {
        let config = BattleConfig::default();
        let sword = sword();

        let hit = attack_damage(4, Some(&sword), card("7c"), normal(20), &config);
        assert_eq!(hit.raw, 4);
        assert!(!hit.instant_kill);

        let miss = attack_damage(4, Some(&sword), card("3c"), normal(20), &config);
        assert_eq!(miss.raw, 0);
        assert!(miss.is_miss());
        assert_eq!(miss.resolution, Resolution::Miss);
    }

    #[test]
    fn test_floor() {
        let config = BattleConfig::default();
        let bow = WeaponDef::new("bow", "Bow")
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 14), 1.5));

        assert_eq!(attack_damage(5, Some(&bow), card("2c"), normal(20), &config).raw, 7);
    }

    #[test]
    fn test_bare_weapon_misses() {
        let config = BattleConfig::default();
        let result = attack_damage(10, None, card("Ah"), normal(20), &config);
        assert_eq!(result.raw, 0);
        assert_eq!(result.resolution, Resolution::Miss);
    }

    #[test]
    fn test_instant_kill_and_boss_policy() {
        let axe = WeaponDef::new("axe", "Axe")
            .with_rule(HitEffect::new(HitCondition::Rank(Rank::Ace), RuleEffect::InstantKill));
        let mut config = BattleConfig::default();

        let kill = attack_damage(1, Some(&axe), card("As"), normal(30), &config);
        assert!(kill.instant_kill);
        assert_eq!(kill.raw, 30);

        let boss = DamageTarget { max_health: 80, is_boss: true };
        let blunted = attack_damage(6, Some(&axe), card("As"), boss, &config);
        assert!(!blunted.instant_kill);
        assert_eq!(blunted.raw, 6);

        config.instant_kill_bosses = true;
        let slain = attack_damage(6, Some(&axe), card("As"), boss, &config);
        assert!(slain.instant_kill);
        assert_eq!(slain.raw, 80);
    }

    #[test]
    fn test_mitigate_queen_against_chainmail() {
        let chain = chainmail();
        let result = mitigate(&[&chain], card("Qd"), 8);

        assert_eq!(result.final_damage, 2);
        assert_eq!(result.reduced, 6);
        assert_eq!(result.armor_used, Some(EquipmentId::from("chainmail")));
    }

    #[test]
    fn test_mitigate_without_armor() {
        let result = mitigate(&[], card("Qd"), 8);
        assert_eq!(result.final_damage, 8);
        assert_eq!(result.reduced, 0);
        assert_eq!(result.armor_used, None);
        assert_eq!(result.resolution, Resolution::NoMitigation);
    }

    #[test]
    fn test_mitigate_no_rule_matches() {
        let chain = chainmail();
        let result = mitigate(&[&chain], card("2d"), 8);
        assert_eq!(result.final_damage, 8);
        assert_eq!(result.armor_used, None);
    }

    #[test]
    fn test_mitigate_picks_best_armor() {
        let chain = chainmail();
        let buckler = ArmorDef::new("buckler", "Buckler")
            .with_rule(HitEffect::multiplier(HitCondition::Rank(Rank::Queen), 0.0));

        let result = mitigate(&[&chain, &buckler], card("Qd"), 8);
        assert_eq!(result.final_damage, 0);
        assert_eq!(result.armor_used, Some(EquipmentId::from("buckler")));

        let result = mitigate(&[&buckler, &chain], card("10d"), 9);
        assert_eq!(result.final_damage, 5);
        assert_eq!(result.armor_used, Some(EquipmentId::from("chainmail")));
    }

    #[test]
    fn test_mitigate_tie_keeps_first_armor() {
        let a = ArmorDef::new("a", "A").with_rule(HitEffect::multiplier(HitCondition::range(2, 14), 0.5));
        let b = ArmorDef::new("b", "B").with_rule(HitEffect::multiplier(HitCondition::range(2, 14), 0.5));

        let result = mitigate(&[&a, &b], card("5h"), 10);
        assert_eq!(result.armor_used, Some(EquipmentId::from("a")));
        assert_eq!(result.final_damage, 5);
    }

    #[test]
    fn test_mitigate_negative_incoming() {
        let chain = chainmail();
        let result = mitigate(&[&chain], card("Qd"), -3);
        assert_eq!(result.final_damage, 0);
        assert_eq!(result.reduced, 0);
    }

    #[test]
    fn test_cardless_results() {
        let miss = AttackDamage::miss();
        assert!(miss.is_miss());
        assert_eq!(miss.resolution, Resolution::Miss);

        let taken = Mitigation::unmitigated(7);
        assert_eq!(taken.final_damage, 7);
        assert_eq!(taken.reduced, 0);
        assert_eq!(taken.armor_used, None);
    }
}
