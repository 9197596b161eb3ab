//! Engine error type.
//!
//! Contract violations (`InvalidCard`, `InvalidIndex`) abort the request.
//! `WrongPhase` carries the authoritative phase so the caller can resync.
//! Equipment desync is deliberately absent: it resolves to a miss or to
//! unmitigated damage and is only logged.

use thiserror::Error;

use crate::battle::PhaseReport;
use crate::session::SessionId;

/// Errors surfaced by the battle engine and session service.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BattleError {
    /// Unknown rank or suit.
    #[error("invalid card: {0}")]
    InvalidCard(String),

    /// Hand index out of range.
    #[error("hand index {index} out of range (hand size {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Action submitted in an incompatible phase.
    #[error("action not allowed: {0}")]
    WrongPhase(PhaseReport),

    /// A new encounter was requested while one is still active.
    #[error("session {0} already has an active encounter")]
    EncounterAlreadyActive(SessionId),

    /// A new encounter was requested for a player with no health left.
    #[error("session {0} has no health left; heal before the next encounter")]
    NoHealth(SessionId),

    /// An action was submitted for a session with no encounter.
    #[error("session {0} has no active encounter")]
    NoActiveEncounter(SessionId),

    /// The store has no record for the session.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// Equipment catalog failed validation.
    #[error("invalid equipment: {0}")]
    InvalidEquipment(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A stored document could not be encoded or decoded.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BattleError>;

impl From<toml::de::Error> for BattleError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<bincode::Error> for BattleError {
    fn from(err: bincode::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BattleError::InvalidIndex { index: 7, len: 3 };
        assert_eq!(err.to_string(), "hand index 7 out of range (hand size 3)");

        let err = BattleError::EncounterAlreadyActive(SessionId::new("alice"));
        assert_eq!(err.to_string(), "session alice already has an active encounter");
    }

    #[test]
    fn test_toml_error_converts_to_config() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= nope");
        let err: BattleError = parsed.unwrap_err().into();
        assert!(matches!(err, BattleError::Config(_)));
    }
}
