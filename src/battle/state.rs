//! Battle state: everything one encounter needs, as a single owned value.
//!
//! The state is plain data so the persistence layer can store it as an
//! opaque document. It carries its own RNG state; reloading a saved battle
//! continues the same reshuffle sequence.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::{BattlePhase, PhaseReport};
use crate::cards::Card;
use crate::core::{CombatantStats, GameRngState};
use crate::equipment::EquipmentId;
use crate::zones::Piles;

/// The player side of an encounter as handed over by the profile layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerLoadout {
    pub stats: CombatantStats,
    pub health: i64,
    pub max_health: i64,
    pub deck: Vec<Card>,
    pub weapon: Option<EquipmentId>,
    pub armor: Vec<EquipmentId>,
}

/// Which combatant acted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// What a logged step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEvent {
    Attack,
    InstantKill,
    Miss,
    Discard,
    Defend,
}

/// One entry of the battle log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub side: Side,
    pub event: TurnEvent,
    pub card: Option<Card>,
    /// Damage dealt by an attack, or taken after mitigation on defend.
    pub amount: i64,
}

/// State of one active encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub phase: BattlePhase,
    /// Turn number (starts at 1; advances each time play returns to the
    /// player's attack).
    pub turn: u32,

    pub player_stats: CombatantStats,
    pub player_health: i64,
    pub player_max_health: i64,
    pub player: Piles,
    pub player_hand_limit: usize,
    pub equipped_weapon: Option<EquipmentId>,
    pub equipped_armor: Vec<EquipmentId>,

    pub enemy_id: String,
    pub enemy_is_boss: bool,
    pub enemy_stats: CombatantStats,
    pub enemy_health: i64,
    pub enemy_max_health: i64,
    pub enemy: Piles,
    pub enemy_hand_limit: usize,
    pub enemy_weapon: Option<EquipmentId>,
    pub enemy_discards_used: u32,

    /// Damage waiting to be defended. Non-zero only in `PlayerDefend`.
    pub pending_enemy_damage: i64,

    pub rng: GameRngState,
    pub log: Vector<TurnRecord>,

    player_cards: usize,
    enemy_cards: usize,
}

impl BattleState {
    /// Assemble a fresh state. Piles are taken as given.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        loadout: &PlayerLoadout,
        player: Piles,
        player_hand_limit: usize,
        enemy_id: String,
        enemy_is_boss: bool,
        enemy_stats: CombatantStats,
        enemy_max_health: i64,
        enemy: Piles,
        enemy_hand_limit: usize,
        enemy_weapon: Option<EquipmentId>,
        rng: GameRngState,
    ) -> Self {
        Self {
            phase: BattlePhase::PlayerAttack,
            turn: 1,
            player_stats: loadout.stats,
            player_health: loadout.health,
            player_max_health: loadout.max_health,
            player_cards: player.total_cards(),
            player,
            player_hand_limit,
            equipped_weapon: loadout.weapon.clone(),
            equipped_armor: loadout.armor.clone(),
            enemy_id,
            enemy_is_boss,
            enemy_stats,
            enemy_health: enemy_max_health,
            enemy_max_health,
            enemy_cards: enemy.total_cards(),
            enemy,
            enemy_hand_limit,
            enemy_weapon,
            enemy_discards_used: 0,
            pending_enemy_damage: 0,
            rng,
            log: Vector::new(),
        }
    }

    /// Snapshot for resynchronizing a caller.
    #[must_use]
    pub fn report(&self) -> PhaseReport {
        PhaseReport {
            phase: self.phase,
            turn: self.turn,
            player_health: self.player_health,
            enemy_health: self.enemy_health,
        }
    }

    /// Card totals `(player, enemy)` fixed at encounter start.
    #[must_use]
    pub fn card_counts(&self) -> (usize, usize) {
        (self.player_cards, self.enemy_cards)
    }

    /// Do both sides still hold exactly the cards they started with?
    #[must_use]
    pub fn cards_conserved(&self) -> bool {
        self.player.total_cards() == self.player_cards && self.enemy.total_cards() == self.enemy_cards
    }

    pub(crate) fn record(&mut self, side: Side, event: TurnEvent, card: Option<Card>, amount: i64) {
        self.log.push_back(TurnRecord {
            turn: self.turn,
            side,
            event,
            card,
            amount,
        });
    }
}
