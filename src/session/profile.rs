//! Persistent player data and the per-session record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::battle::{BattleState, PlayerLoadout};
use crate::cards::{standard_deck, Card};
use crate::core::{CombatantStats, GameRngState, GameRng};
use crate::equipment::EquipmentId;

/// Key of one stored session (usually a user id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything about the player that outlives a single encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub stats: CombatantStats,
    pub health: i64,
    pub max_health: i64,
    pub deck: Vec<Card>,
    /// Equipment the player owns.
    pub owned: Vec<EquipmentId>,
    pub equipped_weapon: Option<EquipmentId>,
    pub equipped_armor: Vec<EquipmentId>,
    /// Run-level RNG; every encounter forks from it.
    pub rng: GameRngState,
}

impl PlayerProfile {
    /// A fresh profile at full health with a standard deck.
    #[must_use]
    pub fn new(stats: CombatantStats, max_health: i64, seed: u64) -> Self {
        Self {
            stats,
            health: max_health,
            max_health,
            deck: standard_deck(),
            owned: Vec::new(),
            equipped_weapon: None,
            equipped_armor: Vec::new(),
            rng: GameRng::new(seed).state(),
        }
    }

    /// Add equipment to the owned list. Owning something twice is a no-op.
    pub fn grant(&mut self, id: impl Into<EquipmentId>) {
        let id = id.into();
        if !self.owned.contains(&id) {
            self.owned.push(id);
        }
    }

    #[must_use]
    pub fn owns(&self, id: &EquipmentId) -> bool {
        self.owned.contains(id)
    }

    pub fn equip_weapon(&mut self, id: impl Into<EquipmentId>) {
        self.equipped_weapon = Some(id.into());
    }

    pub fn equip_armor(&mut self, id: impl Into<EquipmentId>) {
        let id = id.into();
        if !self.equipped_armor.contains(&id) {
            self.equipped_armor.push(id);
        }
    }

    /// Inject an extra card into the deck (card rewards, curses).
    pub fn add_card(&mut self, card: Card) {
        self.deck.push(card);
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    /// What the player brings into battle. Equipped items the player does
    /// not own are left behind.
    #[must_use]
    pub fn loadout(&self) -> PlayerLoadout {
        let weapon = self.equipped_weapon.clone().filter(|id| {
            let owned = self.owns(id);
            if !owned {
                warn!(weapon = %id, "equipped weapon is not owned");
            }
            owned
        });
        let armor = self
            .equipped_armor
            .iter()
            .filter(|id| {
                let owned = self.owns(id);
                if !owned {
                    warn!(armor = %id, "equipped armor is not owned");
                }
                owned
            })
            .cloned()
            .collect();

        PlayerLoadout {
            stats: self.stats,
            health: self.health,
            max_health: self.max_health,
            deck: self.deck.clone(),
            weapon,
            armor,
        }
    }
}

/// One stored document: the profile plus the active battle, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub profile: PlayerProfile,
    pub battle: Option<BattleState>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(profile: PlayerProfile) -> Self {
        Self { profile, battle: None }
    }

    #[must_use]
    pub fn in_encounter(&self) -> bool {
        self.battle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PlayerProfile {
        PlayerProfile::new(CombatantStats::new(4, 2, 0, 5), 30, 9)
    }

    #[test]
    fn test_new_profile() {
        let profile = profile();
        assert_eq!(profile.health, 30);
        assert_eq!(profile.deck.len(), 52);
        assert!(profile.owned.is_empty());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut profile = profile();
        profile.grant("short_sword");
        profile.grant("short_sword");
        assert_eq!(profile.owned.len(), 1);
    }

    #[test]
    fn test_loadout_drops_unowned_equipment() {
        let mut profile = profile();
        profile.grant("chainmail");
        profile.equip_weapon("longsword");
        profile.equip_armor("chainmail");
        profile.equip_armor("buckler");

        let loadout = profile.loadout();
        assert_eq!(loadout.weapon, None);
        assert_eq!(loadout.armor, vec![EquipmentId::from("chainmail")]);
    }

    #[test]
    fn test_add_card() {
        let mut profile = profile();
        profile.add_card("Ah".parse().unwrap());
        assert_eq!(profile.deck.len(), 53);
        assert_eq!(profile.loadout().deck.len(), 53);
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId::new("bob").to_string(), "bob");
        assert_eq!(SessionId::from("bob").as_str(), "bob");
    }
}
