//! The battle state machine.
//!
//! `BattleEngine` is the only caller of the deck, damage and policy
//! components. Each transition works on a copy of the state and commits
//! it only on success, so a rejected action (wrong phase, bad index)
//! never leaves a half-applied battle behind.
//!
//! ## Implementation Notes
//!
//! - Equipment named by an action but not equipped is resolved bare
//!   (miss / no mitigation) and logged, never rejected.
//! - Empty decks are a steady state: hands simply stay short. A player
//!   with no cards at all attacks for a miss and defends unmitigated, and
//!   the submitted hand index is ignored.
//! - `advance` runs the enemy turn right after a player attack.

use tracing::{debug, info, warn};

use super::action::{BattleAction, EnemyTurnReport, Transition};
use super::enemy::EnemyDefinition;
use super::phase::{BattleOutcome, BattlePhase};
use super::state::{BattleState, PlayerLoadout, Side, TurnEvent};
use crate::cards::Card;
use crate::combat::{attack_damage, mitigate, AttackDamage, DamageTarget, Mitigation};
use crate::core::{BattleConfig, BattleError, GameRng, Result};
use crate::equipment::{ArmorDef, EquipmentId, EquipmentRegistry, WeaponDef};
use crate::policy::{EnemyPolicy, GreedyPolicy};
use crate::zones::Piles;

/// Runs encounters against an equipment catalog.
///
/// ## Example
///
/// ```
/// use card_battle::battle::{BattleAction, BattleEngine, BattlePhase, EnemyDefinition, PlayerLoadout};
/// use card_battle::cards::standard_deck;
/// use card_battle::core::{CombatantStats, GameRng};
///
/// let engine = BattleEngine::builtin();
/// let loadout = PlayerLoadout {
///     stats: CombatantStats::new(4, 3, 0, 5),
///     health: 30,
///     max_health: 30,
///     deck: standard_deck(),
///     weapon: Some("short_sword".into()),
///     armor: vec![],
/// };
/// let goblin = EnemyDefinition::new("goblin", "Goblin", CombatantStats::new(2, 0, 1, 4), 10)
///     .with_weapon("claws");
///
/// let mut state = engine.start(&loadout, &goblin, 0, GameRng::new(7));
/// assert_eq!(state.phase, BattlePhase::PlayerAttack);
/// assert_eq!(state.player.hand().len(), 5);
///
/// let result = engine.advance(&mut state, &BattleAction::attack(0, "short_sword")).unwrap();
/// assert_ne!(result.new_phase, BattlePhase::EnemyTurn);
/// ```
#[derive(Clone, Debug)]
pub struct BattleEngine<P: EnemyPolicy = GreedyPolicy> {
    registry: EquipmentRegistry,
    config: BattleConfig,
    policy: P,
}

impl BattleEngine<GreedyPolicy> {
    /// Engine with the greedy enemy policy.
    #[must_use]
    pub fn new(registry: EquipmentRegistry, config: BattleConfig) -> Self {
        Self::with_policy(registry, config, GreedyPolicy)
    }

    /// Engine with the built-in catalog and default config.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EquipmentRegistry::builtin(), BattleConfig::default())
    }
}

impl<P: EnemyPolicy> BattleEngine<P> {
    #[must_use]
    pub fn with_policy(registry: EquipmentRegistry, config: BattleConfig, policy: P) -> Self {
        Self { registry, config, policy }
    }

    #[must_use]
    pub fn registry(&self) -> &EquipmentRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // === Encounter Setup ===

    /// Start an encounter: shuffle both decks and draw opening hands.
    #[must_use]
    pub fn start(
        &self,
        loadout: &PlayerLoadout,
        enemy: &EnemyDefinition,
        level: u32,
        mut rng: GameRng,
    ) -> BattleState {
        let scaled = enemy.scaled(level, &self.config);
        let player_limit = self.config.hand_limit(loadout.stats.focus);
        let enemy_limit = self.config.hand_limit(scaled.stats.focus);

        let mut player = Piles::new(loadout.deck.clone(), &mut rng);
        let mut foe = Piles::new(enemy.deck_cards(), &mut rng);
        player.draw_up_to(player_limit, &mut rng);
        foe.draw_up_to(enemy_limit, &mut rng);

        info!(
            enemy = %enemy.id,
            level,
            health = scaled.max_health,
            boss = enemy.is_boss,
            "encounter started"
        );

        BattleState::new(
            loadout,
            player,
            player_limit,
            enemy.id.clone(),
            enemy.is_boss,
            scaled.stats,
            scaled.max_health,
            foe,
            enemy_limit,
            enemy.weapon.clone(),
            rng.state(),
        )
    }

    // === Transitions ===

    /// Apply a player action. An attack that hands the turn to the enemy
    /// also runs the enemy turn before returning.
    pub fn advance(&self, state: &mut BattleState, action: &BattleAction) -> Result<Transition> {
        match action {
            BattleAction::Attack { card, weapon } => {
                let before = state.clone();
                let attack = self.player_attack(state, *card, weapon.as_ref())?;
                if state.phase != BattlePhase::EnemyTurn {
                    return Ok(attack);
                }
                match self.enemy_turn(state) {
                    Ok(enemy) => Ok(attack.then(enemy)),
                    Err(err) => {
                        *state = before;
                        Err(err)
                    }
                }
            }
            BattleAction::Defend { card, armor } => self.player_defend(state, *card, armor),
        }
    }

    /// `player-attack`: play a card with the named weapon.
    pub fn player_attack(
        &self,
        state: &mut BattleState,
        card_index: usize,
        weapon_id: Option<&EquipmentId>,
    ) -> Result<Transition> {
        expect_phase(state, BattlePhase::PlayerAttack)?;

        let mut next = state.clone();
        let mut rng = GameRng::from_state(&next.rng);

        let (weapon, mismatch) = self.player_weapon(&next, weapon_id);
        let card = play_if_any(&mut next, card_index)?;
        let damage = match card {
            Some(card) => attack_damage(
                next.player_stats.power,
                weapon,
                card,
                DamageTarget {
                    max_health: next.enemy_max_health,
                    is_boss: next.enemy_is_boss,
                },
                &self.config,
            ),
            None => AttackDamage::miss(),
        };

        next.enemy_health = if damage.instant_kill {
            0
        } else {
            (next.enemy_health - damage.raw).max(0)
        };
        let event = if damage.instant_kill {
            TurnEvent::InstantKill
        } else if damage.is_miss() {
            TurnEvent::Miss
        } else {
            TurnEvent::Attack
        };
        next.record(Side::Player, event, card, damage.raw);
        next.player.draw_up_to(next.player_hand_limit, &mut rng);

        next.phase = if next.enemy_health <= 0 {
            BattlePhase::BattleOver(BattleOutcome::Victory)
        } else {
            BattlePhase::EnemyTurn
        };

        debug!(
            ?card,
            damage = damage.raw,
            instant_kill = damage.instant_kill,
            enemy_health = next.enemy_health,
            phase = %next.phase,
            "player attack"
        );

        let mut transition = self.commit(state, next, rng);
        transition.damage_dealt = damage.raw;
        transition.player_attack = Some(damage);
        transition.equipment_mismatch = mismatch;
        Ok(transition)
    }

    /// `enemy-turn`: optional discard, then attack with the best card.
    pub fn enemy_turn(&self, state: &mut BattleState) -> Result<Transition> {
        expect_phase(state, BattlePhase::EnemyTurn)?;

        let mut next = state.clone();
        let mut rng = GameRng::from_state(&next.rng);
        let weapon = self.enemy_weapon(&next);

        let decision = self.policy.discard_choice(
            next.enemy.hand(),
            weapon,
            next.enemy_stats.craft,
            next.enemy_discards_used,
        );
        let mut discarded = None;
        if let (true, Some(index)) = (decision.discard, decision.index) {
            let card = next.enemy.discard(index)?;
            next.enemy_discards_used += 1;
            next.record(Side::Enemy, TurnEvent::Discard, Some(card), 0);
            next.enemy.draw_up_to(next.enemy_hand_limit, &mut rng);
            debug!(%card, used = next.enemy_discards_used, "enemy discard");
            discarded = Some(card);
        }

        let mut report = EnemyTurnReport {
            discarded,
            played: None,
            attack: None,
            pending_damage: 0,
        };

        if let Some(index) = self.policy.attack_choice(next.enemy.hand(), weapon) {
            let card = next.enemy.play_card(index)?;
            let damage = attack_damage(
                next.enemy_stats.power,
                weapon,
                card,
                DamageTarget {
                    max_health: next.player_max_health,
                    is_boss: false,
                },
                &self.config,
            );
            let pending = if damage.instant_kill {
                next.player_health.max(0)
            } else {
                damage.raw
            };
            let event = if damage.instant_kill {
                TurnEvent::InstantKill
            } else if damage.is_miss() {
                TurnEvent::Miss
            } else {
                TurnEvent::Attack
            };
            next.record(Side::Enemy, event, Some(card), pending);
            next.enemy.draw_up_to(next.enemy_hand_limit, &mut rng);

            report.played = Some(card);
            report.attack = Some(damage);
            report.pending_damage = pending;
        } else {
            next.record(Side::Enemy, TurnEvent::Miss, None, 0);
        }

        if report.pending_damage > 0 {
            next.pending_enemy_damage = report.pending_damage;
            next.phase = BattlePhase::PlayerDefend;
        } else {
            next.pending_enemy_damage = 0;
            next.player.draw_up_to(next.player_hand_limit, &mut rng);
            next.turn += 1;
            next.phase = BattlePhase::PlayerAttack;
        }

        debug!(
            played = ?report.played,
            pending = report.pending_damage,
            phase = %next.phase,
            "enemy turn"
        );

        let mut transition = self.commit(state, next, rng);
        transition.enemy_turn = Some(report);
        Ok(transition)
    }

    /// `player-defend`: play a card against the pending damage.
    pub fn player_defend(
        &self,
        state: &mut BattleState,
        card_index: usize,
        armor_ids: &[EquipmentId],
    ) -> Result<Transition> {
        expect_phase(state, BattlePhase::PlayerDefend)?;

        let mut next = state.clone();
        let mut rng = GameRng::from_state(&next.rng);

        let (armors, mismatch) = self.player_armor(&next, armor_ids);
        let card = play_if_any(&mut next, card_index)?;
        let mitigation = match card {
            Some(card) => mitigate(&armors, card, next.pending_enemy_damage),
            None => Mitigation::unmitigated(next.pending_enemy_damage),
        };

        next.player_health -= mitigation.final_damage;
        next.pending_enemy_damage = 0;
        next.record(Side::Player, TurnEvent::Defend, card, mitigation.final_damage);
        next.player.draw_up_to(next.player_hand_limit, &mut rng);

        if next.player_health <= 0 {
            next.player_health = 0;
            next.phase = BattlePhase::BattleOver(BattleOutcome::Defeat);
        } else {
            next.turn += 1;
            next.phase = BattlePhase::PlayerAttack;
        }

        debug!(
            ?card,
            taken = mitigation.final_damage,
            reduced = mitigation.reduced,
            player_health = next.player_health,
            phase = %next.phase,
            "player defend"
        );

        let mut transition = self.commit(state, next, rng);
        transition.damage_taken = mitigation.final_damage;
        transition.defense = Some(mitigation);
        transition.equipment_mismatch = mismatch;
        Ok(transition)
    }

    // === Helpers ===

    /// Store the RNG, swap in the new state and describe the result.
    fn commit(&self, state: &mut BattleState, mut next: BattleState, rng: GameRng) -> Transition {
        next.rng = rng.state();
        debug_assert!(next.cards_conserved(), "card conservation violated");
        debug_assert!(next.phase == BattlePhase::PlayerDefend || next.pending_enemy_damage == 0);

        if let Some(outcome) = next.phase.outcome() {
            info!(enemy = %next.enemy_id, ?outcome, turn = next.turn, "battle over");
        }

        *state = next;
        Transition {
            new_phase: state.phase,
            turn: state.turn,
            damage_dealt: 0,
            damage_taken: 0,
            player_attack: None,
            enemy_turn: None,
            defense: None,
            player_hand: state.player.hand().to_vec(),
            enemy_hand: state.enemy.hand().to_vec(),
            outcome: state.phase.outcome(),
            equipment_mismatch: false,
        }
    }

    /// The weapon an attack really uses. Anything other than the equipped,
    /// known weapon is a desync and resolves bare.
    fn player_weapon(&self, state: &BattleState, requested: Option<&EquipmentId>) -> (Option<&WeaponDef>, bool) {
        let Some(id) = requested else {
            return (None, false);
        };
        if state.equipped_weapon.as_ref() != Some(id) {
            warn!(weapon = %id, "attack with a weapon that is not equipped");
            return (None, true);
        }
        match self.registry.weapon(id) {
            Some(weapon) => (Some(weapon), false),
            None => {
                warn!(weapon = %id, "equipped weapon missing from catalog");
                (None, true)
            }
        }
    }

    /// The armors a defense really uses; unequipped or unknown ids drop out.
    fn player_armor(&self, state: &BattleState, requested: &[EquipmentId]) -> (Vec<&ArmorDef>, bool) {
        let mut mismatch = false;
        let mut armors = Vec::with_capacity(requested.len());
        for id in requested {
            let armor = state
                .equipped_armor
                .contains(id)
                .then(|| self.registry.armor(id))
                .flatten();
            match armor {
                Some(armor) => armors.push(armor),
                None => {
                    warn!(armor = %id, "defend with armor that is not equipped");
                    mismatch = true;
                }
            }
        }
        (armors, mismatch)
    }

    fn enemy_weapon(&self, state: &BattleState) -> Option<&WeaponDef> {
        let id = state.enemy_weapon.as_ref()?;
        let weapon = self.registry.weapon(id);
        if weapon.is_none() {
            warn!(enemy = %state.enemy_id, weapon = %id, "enemy weapon missing from catalog");
        }
        weapon
    }
}

/// Play the player's card at `index`, or nothing when the hand is empty
/// because every pile has run out.
fn play_if_any(state: &mut BattleState, index: usize) -> Result<Option<Card>> {
    if state.player.hand().is_empty() {
        debug!(index, "player has no cards; playing nothing");
        return Ok(None);
    }
    state.player.play_card(index).map(Some)
}

fn expect_phase(state: &BattleState, phase: BattlePhase) -> Result<()> {
    if state.phase == phase {
        Ok(())
    } else {
        debug!(expected = %phase, actual = %state.phase, "rejected action for wrong phase");
        Err(BattleError::WrongPhase(state.report()))
    }
}
