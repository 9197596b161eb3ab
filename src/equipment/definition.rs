//! Equipment definitions - static weapon and armor data.
//!
//! Each piece of equipment is an ordered list of `HitEffect` rules. The
//! order is part of the data: the first rule whose condition matches a
//! card decides the effect, so rule lists are never sorted or deduped.

use serde::{Deserialize, Serialize};

use super::condition::HitCondition;
use super::resolver::{resolve_rules, Resolution};
use crate::cards::Card;
use crate::policy::DiscardTactic;

/// Unique identifier for a piece of equipment (`"short_sword"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(pub String);

impl EquipmentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EquipmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which slot a piece of equipment fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Weapon,
    Armor,
}

impl EquipmentKind {
    /// Result when no rule matches: weapons miss, armor doesn't mitigate.
    #[must_use]
    pub const fn no_match(self) -> Resolution {
        match self {
            EquipmentKind::Weapon => Resolution::Miss,
            EquipmentKind::Armor => Resolution::NoMitigation,
        }
    }
}

/// Effect half of an equipment rule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEffect {
    /// Scale damage. Weapons multiply attacker power; armor multiplies
    /// incoming damage (0.0 is a full dodge).
    Multiplier(f64),

    /// The hit is lethal whatever the numbers say. Weapons only.
    InstantKill,
}

/// A single `condition -> effect` rule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitEffect {
    pub condition: HitCondition,
    pub effect: RuleEffect,
}

impl HitEffect {
    #[must_use]
    pub const fn new(condition: HitCondition, effect: RuleEffect) -> Self {
        Self { condition, effect }
    }

    /// Rule with a plain multiplier.
    #[must_use]
    pub const fn multiplier(condition: HitCondition, multiplier: f64) -> Self {
        Self::new(condition, RuleEffect::Multiplier(multiplier))
    }
}

/// Weapon definition.
///
/// ## Example
///
/// ```
/// use card_battle::equipment::{HitCondition, HitEffect, Resolution, WeaponDef};
///
/// let sword = WeaponDef::new("short_sword", "Short Sword")
///     .with_rule(HitEffect::multiplier(HitCondition::range(5, 14), 1.0));
///
/// assert_eq!(sword.resolve("7h".parse().unwrap()).multiplier(), 1.0);
/// assert_eq!(sword.resolve("3h".parse().unwrap()), Resolution::Miss);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: EquipmentId,
    pub name: String,
    pub rules: Vec<HitEffect>,
    /// How an enemy wielding this weapon decides to cycle cards.
    #[serde(default)]
    pub tactic: DiscardTactic,
}

impl WeaponDef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EquipmentId::new(id),
            name: name.into(),
            rules: Vec::new(),
            tactic: DiscardTactic::default(),
        }
    }

    /// Append a rule (builder pattern). Rules keep insertion order.
    #[must_use]
    pub fn with_rule(mut self, rule: HitEffect) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_tactic(mut self, tactic: DiscardTactic) -> Self {
        self.tactic = tactic;
        self
    }

    /// Resolve a card against this weapon's rules.
    #[must_use]
    pub fn resolve(&self, card: Card) -> Resolution {
        resolve_rules(&self.rules, EquipmentKind::Weapon, card)
    }
}

/// Armor definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmorDef {
    pub id: EquipmentId,
    pub name: String,
    pub rules: Vec<HitEffect>,
}

impl ArmorDef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EquipmentId::new(id),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: HitEffect) -> Self {
        self.rules.push(rule);
        self
    }

    /// Resolve a card against this armor's rules.
    #[must_use]
    pub fn resolve(&self, card: Card) -> Resolution {
        resolve_rules(&self.rules, EquipmentKind::Armor, card)
    }
}

/// Closed set of equipment kinds, each carrying its rule list as data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Weapon(WeaponDef),
    Armor(ArmorDef),
}

impl Equipment {
    #[must_use]
    pub fn id(&self) -> &EquipmentId {
        match self {
            Equipment::Weapon(w) => &w.id,
            Equipment::Armor(a) => &a.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Equipment::Weapon(w) => &w.name,
            Equipment::Armor(a) => &a.name,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EquipmentKind {
        match self {
            Equipment::Weapon(_) => EquipmentKind::Weapon,
            Equipment::Armor(_) => EquipmentKind::Armor,
        }
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[HitEffect] {
        match self {
            Equipment::Weapon(w) => &w.rules,
            Equipment::Armor(a) => &a.rules,
        }
    }

    #[must_use]
    pub fn as_weapon(&self) -> Option<&WeaponDef> {
        match self {
            Equipment::Weapon(w) => Some(w),
            Equipment::Armor(_) => None,
        }
    }

    #[must_use]
    pub fn as_armor(&self) -> Option<&ArmorDef> {
        match self {
            Equipment::Armor(a) => Some(a),
            Equipment::Weapon(_) => None,
        }
    }
}

impl From<WeaponDef> for Equipment {
    fn from(weapon: WeaponDef) -> Self {
        Equipment::Weapon(weapon)
    }
}

impl From<ArmorDef> for Equipment {
    fn from(armor: ArmorDef) -> Self {
        Equipment::Armor(armor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_accessors() {
        let weapon: Equipment = WeaponDef::new("bow", "Bow")
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 6), 1.5))
            .into();

        assert_eq!(weapon.id().as_str(), "bow");
        assert_eq!(weapon.name(), "Bow");
        assert_eq!(weapon.kind(), EquipmentKind::Weapon);
        assert_eq!(weapon.rules().len(), 1);
        assert!(weapon.as_weapon().is_some());
        assert!(weapon.as_armor().is_none());
    }

    #[test]
    fn test_no_match_per_kind() {
        assert_eq!(EquipmentKind::Weapon.no_match(), Resolution::Miss);
        assert_eq!(EquipmentKind::Armor.no_match(), Resolution::NoMitigation);
    }

    #[test]
    fn test_equipment_id_display() {
        let id = EquipmentId::from("chainmail");
        assert_eq!(id.to_string(), "chainmail");
    }
}
