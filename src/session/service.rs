//! Load / start / advance / report around a `SessionStore`.
//!
//! Every successful call ends with a whole-document save. A failed call
//! saves nothing, so the stored record is always the last consistent one.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::profile::{PlayerProfile, SessionId, SessionRecord};
use super::store::SessionStore;
use crate::battle::{BattleAction, BattleEngine, BattleOutcome, BattleState, EnemyDefinition, Transition};
use crate::cards::Card;
use crate::core::{BattleError, GameRng, Result};
use crate::policy::{EnemyPolicy, GreedyPolicy};

/// The only thing the engine tells the reward layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub victory: bool,
}

/// Result of `BattleService::advance`.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvanceResponse {
    pub transition: Transition,
    /// State after the transition. Already cleared from the store when the
    /// battle is over.
    pub state: BattleState,
    /// Set once the battle is over.
    pub report: Option<BattleReport>,
}

/// Session-level facade over the engine and a store.
#[derive(Debug)]
pub struct BattleService<S: SessionStore, P: EnemyPolicy = GreedyPolicy> {
    engine: BattleEngine<P>,
    store: S,
}

impl<S: SessionStore, P: EnemyPolicy> BattleService<S, P> {
    pub fn new(engine: BattleEngine<P>, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &BattleEngine<P> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a fresh profile, replacing whatever was there.
    pub fn create_profile(&mut self, id: &SessionId, profile: PlayerProfile) -> Result<()> {
        info!(session = %id, "profile created");
        self.store.save(id, &SessionRecord::new(profile))
    }

    /// Load the record for a session.
    pub fn load(&self, id: &SessionId) -> Result<SessionRecord> {
        self.store
            .load(id)?
            .ok_or_else(|| BattleError::SessionNotFound(id.clone()))
    }

    /// Edit the profile between encounters.
    pub fn update_profile(&mut self, id: &SessionId, edit: impl FnOnce(&mut PlayerProfile)) -> Result<()> {
        let mut record = self.load(id)?;
        if record.in_encounter() {
            return Err(BattleError::EncounterAlreadyActive(id.clone()));
        }
        edit(&mut record.profile);
        self.store.save(id, &record)
    }

    /// Add a card to the deck. Only allowed outside an encounter.
    pub fn inject_card(&mut self, id: &SessionId, card: Card) -> Result<()> {
        self.update_profile(id, |profile| profile.add_card(card))
    }

    /// Start an encounter for a session with no active battle. The player
    /// must have health left from the previous one.
    pub fn start_encounter(&mut self, id: &SessionId, enemy: &EnemyDefinition, level: u32) -> Result<BattleState> {
        let mut record = self.load(id)?;
        if record.in_encounter() {
            return Err(BattleError::EncounterAlreadyActive(id.clone()));
        }
        if record.profile.health <= 0 {
            return Err(BattleError::NoHealth(id.clone()));
        }

        let mut run_rng = GameRng::from_state(&record.profile.rng);
        let encounter_rng = run_rng.fork();
        record.profile.rng = run_rng.state();

        let state = self
            .engine
            .start(&record.profile.loadout(), enemy, level, encounter_rng);
        record.battle = Some(state.clone());
        self.store.save(id, &record)?;

        info!(session = %id, enemy = %enemy.id, level, "session entered encounter");
        Ok(state)
    }

    /// Apply one player action to the session's battle and persist it.
    pub fn advance(&mut self, id: &SessionId, action: &BattleAction) -> Result<AdvanceResponse> {
        let mut record = self.load(id)?;
        let mut state = record
            .battle
            .take()
            .ok_or_else(|| BattleError::NoActiveEncounter(id.clone()))?;

        let transition = self.engine.advance(&mut state, action)?;
        record.profile.health = state.player_health;

        let report = state.phase.outcome().map(|outcome| BattleReport {
            victory: outcome == BattleOutcome::Victory,
        });
        match report {
            Some(report) => {
                info!(session = %id, victory = report.victory, turn = state.turn, "encounter finished");
            }
            None => record.battle = Some(state.clone()),
        }
        self.store.save(id, &record)?;

        Ok(AdvanceResponse { transition, state, report })
    }
}
