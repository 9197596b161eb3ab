//! Equipment registry for definition lookup.
//!
//! The `EquipmentRegistry` stores every weapon and armor the game knows,
//! keyed by `EquipmentId`. It ships a built-in catalog and can load more
//! from TOML, where `[[weapon]]` / `[[armor]]` tables keep their rule
//! arrays in declaration order.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::condition::HitCondition;
use super::definition::{ArmorDef, Equipment, EquipmentId, HitEffect, RuleEffect, WeaponDef};
use crate::cards::{Color, Rank, Suit};
use crate::core::{BattleError, Result};
use crate::policy::DiscardTactic;

/// Registry of equipment definitions.
///
/// ## Example
///
/// ```
/// use card_battle::equipment::{EquipmentId, EquipmentRegistry};
///
/// let registry = EquipmentRegistry::builtin();
/// let sword = registry.weapon(&EquipmentId::from("short_sword")).unwrap();
/// assert_eq!(sword.name, "Short Sword");
/// assert!(registry.armor(&EquipmentId::from("short_sword")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EquipmentRegistry {
    items: FxHashMap<EquipmentId, Equipment>,
}

#[derive(Deserialize)]
struct Catalog {
    #[serde(default)]
    weapon: Vec<WeaponDef>,
    #[serde(default)]
    armor: Vec<ArmorDef>,
}

impl EquipmentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a piece of equipment after validating it.
    pub fn register(&mut self, equipment: impl Into<Equipment>) -> Result<()> {
        let equipment = equipment.into();
        validate(&equipment)?;
        if self.items.contains_key(equipment.id()) {
            return Err(BattleError::InvalidEquipment(format!(
                "duplicate id {}",
                equipment.id()
            )));
        }
        self.items.insert(equipment.id().clone(), equipment);
        Ok(())
    }

    /// Parse a TOML catalog and register every entry.
    pub fn load_toml_str(&mut self, text: &str) -> Result<usize> {
        let catalog: Catalog = toml::from_str(text)?;
        let count = catalog.weapon.len() + catalog.armor.len();
        for weapon in catalog.weapon {
            self.register(weapon)?;
        }
        for armor in catalog.armor {
            self.register(armor)?;
        }
        tracing::debug!(count, "loaded equipment catalog");
        Ok(count)
    }

    /// Build a registry from a TOML catalog alone.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_toml_str(text)?;
        Ok(registry)
    }

    /// The built-in weapon and armor catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let items = builtin_catalog()
            .into_iter()
            .map(|e| (e.id().clone(), e))
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn get(&self, id: &EquipmentId) -> Option<&Equipment> {
        self.items.get(id)
    }

    /// Look up a weapon. Armor with the same id yields `None`.
    #[must_use]
    pub fn weapon(&self, id: &EquipmentId) -> Option<&WeaponDef> {
        self.get(id).and_then(Equipment::as_weapon)
    }

    /// Look up an armor. A weapon with the same id yields `None`.
    #[must_use]
    pub fn armor(&self, id: &EquipmentId) -> Option<&ArmorDef> {
        self.get(id).and_then(Equipment::as_armor)
    }

    #[must_use]
    pub fn contains(&self, id: &EquipmentId) -> bool {
        self.items.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Equipment> {
        self.items.values()
    }
}

/// Check a definition for data errors.
///
/// - ids are non-empty
/// - ranges have `from <= to`
/// - weapon multipliers are finite and non-negative
/// - armor multipliers are in `[0, 1]`
/// - instant kill appears on weapons only
pub fn validate(equipment: &Equipment) -> Result<()> {
    let id = equipment.id();
    let invalid = |msg: String| Err(BattleError::InvalidEquipment(format!("{id}: {msg}")));

    if id.as_str().is_empty() {
        return Err(BattleError::InvalidEquipment("empty equipment id".to_string()));
    }

    for (i, rule) in equipment.rules().iter().enumerate() {
        if let HitCondition::Range { from, to } = rule.condition {
            if from > to {
                return invalid(format!("rule {i} has empty range {from}..={to}"));
            }
        }
        match (equipment, rule.effect) {
            (Equipment::Weapon(_), RuleEffect::Multiplier(m)) if !m.is_finite() || m < 0.0 => {
                return invalid(format!("rule {i} has bad multiplier {m}"));
            }
            (Equipment::Armor(_), RuleEffect::Multiplier(m)) if !(0.0..=1.0).contains(&m) => {
                return invalid(format!("rule {i} armor multiplier {m} outside [0, 1]"));
            }
            (Equipment::Armor(_), RuleEffect::InstantKill) => {
                return invalid(format!("rule {i} instant kill on armor"));
            }
            _ => {}
        }
    }
    Ok(())
}

fn builtin_catalog() -> Vec<Equipment> {
    use HitCondition::{Color as C, Rank as R, Suit as S};
    let range = HitCondition::range;
    let rule = HitEffect::multiplier;

    vec![
        WeaponDef::new("rusty_dagger", "Rusty Dagger")
            .with_rule(rule(R(Rank::Ace), 2.0))
            .with_rule(rule(range(2, 6), 1.0))
            .with_tactic(DiscardTactic::Ranged { above: 8 })
            .into(),
        WeaponDef::new("short_sword", "Short Sword")
            .with_rule(rule(range(5, 14), 1.0))
            .with_tactic(DiscardTactic::Melee { high_hit: 1.0 })
            .into(),
        WeaponDef::new("longsword", "Longsword")
            .with_rule(rule(range(11, 14), 2.0))
            .with_rule(rule(range(7, 10), 1.0))
            .with_tactic(DiscardTactic::Melee { high_hit: 2.0 })
            .into(),
        WeaponDef::new("war_axe", "War Axe")
            .with_rule(rule(R(Rank::King), 3.0))
            .with_rule(rule(C(Color::Red), 1.5))
            .with_rule(rule(range(10, 14), 1.0))
            .with_tactic(DiscardTactic::Melee { high_hit: 3.0 })
            .into(),
        WeaponDef::new("short_bow", "Short Bow")
            .with_rule(rule(range(2, 6), 1.5))
            .with_rule(rule(S(Suit::Spades), 1.0))
            .with_tactic(DiscardTactic::Ranged { above: 7 })
            .into(),
        WeaponDef::new("crossbow", "Crossbow")
            .with_rule(rule(range(2, 4), 2.0))
            .with_rule(rule(range(5, 8), 1.0))
            .with_tactic(DiscardTactic::Ranged { above: 8 })
            .into(),
        WeaponDef::new("oak_staff", "Oak Staff")
            .with_rule(rule(S(Suit::Hearts), 2.0))
            .with_rule(rule(S(Suit::Diamonds), 1.0))
            .into(),
        WeaponDef::new("claws", "Claws")
            .with_rule(rule(C(Color::Black), 1.0))
            .into(),
        WeaponDef::new("executioner_axe", "Executioner's Axe")
            .with_rule(HitEffect::new(R(Rank::Ace), RuleEffect::InstantKill))
            .with_rule(rule(range(9, 13), 1.0))
            .with_tactic(DiscardTactic::Melee { high_hit: 1.0 })
            .into(),
        ArmorDef::new("leather_vest", "Leather Vest")
            .with_rule(rule(range(2, 6), 0.5))
            .into(),
        ArmorDef::new("chainmail", "Chainmail")
            .with_rule(rule(range(9, 11), 0.5))
            .with_rule(rule(range(12, 13), 0.25))
            .into(),
        ArmorDef::new("plate_armor", "Plate Armor")
            .with_rule(rule(C(Color::Black), 0.5))
            .with_rule(rule(range(2, 14), 0.75))
            .into(),
        ArmorDef::new("buckler", "Buckler")
            .with_rule(rule(R(Rank::Ace), 0.0))
            .with_rule(rule(S(Suit::Clubs), 0.5))
            .into(),
        ArmorDef::new("warded_cloak", "Warded Cloak")
            .with_rule(rule(C(Color::Red), 0.5))
            .into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::resolve;

    const CATALOG: &str = r#"
[[weapon]]
id = "twin_blades"
name = "Twin Blades"
tactic = { melee = { high_hit = 2.0 } }
rules = [
    { condition = { rank = "king" }, effect = { multiplier = 2.0 } },
    { condition = { color = "red" }, effect = { multiplier = 1.0 } },
    { condition = { range = { from = 12, to = 14 } }, effect = "instant_kill" },
]

[[armor]]
id = "tower_shield"
name = "Tower Shield"
rules = [
    { condition = { suit = "spades" }, effect = { multiplier = 0.0 } },
]
"#;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let registry = EquipmentRegistry::builtin();
        assert_eq!(registry.len(), builtin_catalog().len());
        for equipment in registry.iter() {
            validate(equipment).unwrap();
        }
    }

    #[test]
    fn test_load_toml_keeps_rule_order() {
        let registry = EquipmentRegistry::from_toml_str(CATALOG).unwrap();
        assert_eq!(registry.len(), 2);

        let blades = registry.weapon(&"twin_blades".into()).unwrap();
        assert_eq!(blades.tactic, DiscardTactic::Melee { high_hit: 2.0 });
        assert_eq!(blades.rules[0].condition, HitCondition::Rank(Rank::King));
        assert_eq!(blades.rules[2].effect, RuleEffect::InstantKill);

        // Qh is red before it is high: rule 1 wins over rule 2.
        assert_eq!(blades.resolve("Qh".parse().unwrap()).rule(), Some(1));
        assert!(blades.resolve("Qs".parse().unwrap()).is_instant_kill());

        let shield = registry.get(&"tower_shield".into()).unwrap();
        assert_eq!(resolve(shield, "2s".parse().unwrap()).multiplier(), 0.0);
    }

    #[test]
    fn test_weapon_tactic_defaults() {
        let registry = EquipmentRegistry::from_toml_str(
            "[[weapon]]\nid = \"stick\"\nname = \"Stick\"\nrules = []",
        )
        .unwrap();
        let stick = registry.weapon(&"stick".into()).unwrap();
        assert_eq!(stick.tactic, DiscardTactic::FaceCard);
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut registry = EquipmentRegistry::new();
        registry.register(ArmorDef::new("cap", "Cap")).unwrap();
        let err = registry.register(WeaponDef::new("cap", "Cap")).unwrap_err();
        assert!(matches!(err, BattleError::InvalidEquipment(_)));
    }

    #[test]
    fn test_rejects_bad_rules() {
        let armor_kill = ArmorDef::new("cursed", "Cursed")
            .with_rule(HitEffect::new(HitCondition::Rank(Rank::Ace), RuleEffect::InstantKill));
        assert!(validate(&armor_kill.into()).is_err());

        let amplifying = ArmorDef::new("glass", "Glass")
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 14), 1.5));
        assert!(validate(&amplifying.into()).is_err());

        let negative = WeaponDef::new("neg", "Neg")
            .with_rule(HitEffect::multiplier(HitCondition::range(2, 14), -1.0));
        assert!(validate(&negative.into()).is_err());

        let backwards = WeaponDef::new("back", "Back")
            .with_rule(HitEffect::multiplier(HitCondition::range(10, 2), 1.0));
        assert!(validate(&backwards.into()).is_err());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = EquipmentRegistry::from_toml_str("[[weapon]]\nid = 3").unwrap_err();
        assert!(matches!(err, BattleError::Config(_)));
    }
}
