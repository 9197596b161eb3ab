//! Battle phases and outcomes.

use serde::{Deserialize, Serialize};

/// How a finished battle ended, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Phase of the battle state machine.
///
/// ```text
/// player-attack -> enemy-turn -> player-defend -> player-attack
///        |              |               |
///        v              +--(miss)-------+--> player-attack
///   battle-over(victory)                v
///                               battle-over(defeat)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    PlayerAttack,
    EnemyTurn,
    PlayerDefend,
    BattleOver(BattleOutcome),
}

impl BattlePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::BattleOver(_))
    }

    #[must_use]
    pub const fn outcome(self) -> Option<BattleOutcome> {
        match self {
            BattlePhase::BattleOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Is the player's hand the one waiting for input?
    #[must_use]
    pub const fn awaits_player(self) -> bool {
        matches!(self, BattlePhase::PlayerAttack | BattlePhase::PlayerDefend)
    }
}

impl std::fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattlePhase::PlayerAttack => f.write_str("player-attack"),
            BattlePhase::EnemyTurn => f.write_str("enemy-turn"),
            BattlePhase::PlayerDefend => f.write_str("player-defend"),
            BattlePhase::BattleOver(BattleOutcome::Victory) => f.write_str("battle-over(victory)"),
            BattlePhase::BattleOver(BattleOutcome::Defeat) => f.write_str("battle-over(defeat)"),
        }
    }
}

/// Authoritative snapshot returned with a rejected action so the caller
/// can resynchronize its view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: BattlePhase,
    pub turn: u32,
    pub player_health: i64,
    pub enemy_health: i64,
}

impl std::fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "battle is in {} (turn {}, player {} hp, enemy {} hp)",
            self.phase, self.turn, self.player_health, self.enemy_health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_and_outcome() {
        assert!(!BattlePhase::PlayerAttack.is_terminal());
        assert!(BattlePhase::BattleOver(BattleOutcome::Defeat).is_terminal());
        assert_eq!(
            BattlePhase::BattleOver(BattleOutcome::Victory).outcome(),
            Some(BattleOutcome::Victory)
        );
        assert_eq!(BattlePhase::EnemyTurn.outcome(), None);
    }

    #[test]
    fn test_awaiting_side() {
        assert!(BattlePhase::PlayerAttack.awaits_player());
        assert!(BattlePhase::PlayerDefend.awaits_player());
        assert!(!BattlePhase::EnemyTurn.awaits_player());
        assert!(!BattlePhase::BattleOver(BattleOutcome::Victory).awaits_player());
    }

    #[test]
    fn test_report_display() {
        let report = PhaseReport {
            phase: BattlePhase::PlayerDefend,
            turn: 3,
            player_health: 12,
            enemy_health: 7,
        };
        assert_eq!(
            report.to_string(),
            "battle is in player-defend (turn 3, player 12 hp, enemy 7 hp)"
        );
    }
}
