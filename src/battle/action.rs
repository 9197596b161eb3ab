//! Player actions and transition results.

use serde::{Deserialize, Serialize};

use super::phase::{BattleOutcome, BattlePhase};
use crate::cards::Card;
use crate::combat::{AttackDamage, Mitigation};
use crate::equipment::EquipmentId;

/// An action submitted by the player.
///
/// `card` is a position in the player's hand. The equipment ids name what
/// the client believes is equipped; anything not actually equipped is
/// treated as bare equipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleAction {
    /// Attack with a card. `None` attacks bare-handed.
    Attack { card: usize, weapon: Option<EquipmentId> },

    /// Defend with a card. An empty list defends with no armor.
    Defend { card: usize, armor: Vec<EquipmentId> },
}

impl BattleAction {
    #[must_use]
    pub fn attack(card: usize, weapon: impl Into<EquipmentId>) -> Self {
        Self::Attack { card, weapon: Some(weapon.into()) }
    }

    #[must_use]
    pub fn defend(card: usize, armor: impl IntoIterator<Item = EquipmentId>) -> Self {
        Self::Defend { card, armor: armor.into_iter().collect() }
    }

    #[must_use]
    pub fn card(&self) -> usize {
        match self {
            BattleAction::Attack { card, .. } | BattleAction::Defend { card, .. } => *card,
        }
    }
}

/// What the enemy did on its turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTurnReport {
    /// Card cycled out before attacking.
    pub discarded: Option<Card>,
    /// Card attacked with. `None` means no card could hit.
    pub played: Option<Card>,
    pub attack: Option<AttackDamage>,
    /// Damage the player now has to defend against.
    pub pending_damage: i64,
}

/// Result of one call into the state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub new_phase: BattlePhase,
    pub turn: u32,
    /// Damage the player's attack dealt this call.
    pub damage_dealt: i64,
    /// Damage the player took after mitigation this call.
    pub damage_taken: i64,
    pub player_attack: Option<AttackDamage>,
    pub enemy_turn: Option<EnemyTurnReport>,
    pub defense: Option<Mitigation>,
    pub player_hand: Vec<Card>,
    pub enemy_hand: Vec<Card>,
    pub outcome: Option<BattleOutcome>,
    /// The action named equipment that is not equipped (resolved bare).
    pub equipment_mismatch: bool,
}

impl Transition {
    /// Fold a follow-up transition (the enemy turn after an attack) into
    /// this one.
    pub(crate) fn then(mut self, next: Transition) -> Transition {
        self.new_phase = next.new_phase;
        self.turn = next.turn;
        self.damage_dealt += next.damage_dealt;
        self.damage_taken += next.damage_taken;
        self.player_attack = self.player_attack.or(next.player_attack);
        self.enemy_turn = next.enemy_turn.or(self.enemy_turn);
        self.defense = next.defense.or(self.defense);
        self.player_hand = next.player_hand;
        self.enemy_hand = next.enemy_hand;
        self.outcome = next.outcome;
        self.equipment_mismatch |= next.equipment_mismatch;
        self
    }
}
