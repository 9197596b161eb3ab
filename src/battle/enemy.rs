//! Enemy definitions and level scaling.

use serde::{Deserialize, Serialize};

use crate::cards::{standard_deck, Card};
use crate::core::{BattleConfig, CombatantStats};
use crate::equipment::EquipmentId;

/// Static enemy data supplied by the encounter layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub stats: CombatantStats,
    pub base_health: i64,
    pub weapon: Option<EquipmentId>,
    #[serde(default)]
    pub is_boss: bool,
    /// Custom deck. `None` means a standard 52-card deck.
    #[serde(default)]
    pub deck: Option<Vec<Card>>,
}

/// An enemy with level scaling applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledEnemy {
    pub stats: CombatantStats,
    pub max_health: i64,
}

impl EnemyDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: CombatantStats, base_health: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            base_health,
            weapon: None,
            is_boss: false,
            deck: None,
        }
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: impl Into<EquipmentId>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    #[must_use]
    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// The cards this enemy fights with.
    #[must_use]
    pub fn deck_cards(&self) -> Vec<Card> {
        self.deck.clone().unwrap_or_else(standard_deck)
    }

    /// Apply level scaling. Level 0 is the base definition.
    #[must_use]
    pub fn scaled(&self, level: u32, config: &BattleConfig) -> ScaledEnemy {
        let mut stats = self.stats;
        if config.levels_per_power > 0 {
            stats.power += i64::from(level / config.levels_per_power) * config.power_per_level;
        }
        ScaledEnemy {
            stats,
            max_health: (self.base_health + i64::from(level) * config.health_per_level).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> EnemyDefinition {
        EnemyDefinition::new("goblin", "Goblin", CombatantStats::new(3, 0, 1, 4), 12)
            .with_weapon("claws")
    }

    #[test]
    fn test_level_zero_is_base() {
        let scaled = goblin().scaled(0, &BattleConfig::default());
        assert_eq!(scaled.max_health, 12);
        assert_eq!(scaled.stats.power, 3);
    }

    #[test]
    fn test_level_scaling() {
        let config = BattleConfig::default();
        let scaled = goblin().scaled(5, &config);

        assert_eq!(scaled.max_health, 12 + 5 * 4);
        assert_eq!(scaled.stats.power, 3 + 2);
        assert_eq!(scaled.stats.focus, 4);
    }

    #[test]
    fn test_power_scaling_disabled() {
        let config = BattleConfig { levels_per_power: 0, ..BattleConfig::default() };
        assert_eq!(goblin().scaled(9, &config).stats.power, 3);
    }

    #[test]
    fn test_default_deck() {
        assert_eq!(goblin().deck_cards().len(), 52);
        let custom = goblin().with_deck(vec!["Ah".parse().unwrap()]);
        assert_eq!(custom.deck_cards().len(), 1);
    }
}
