//! Combatant stats.

use serde::{Deserialize, Serialize};

/// The four stats every combatant carries.
///
/// - `power` scales attack damage.
/// - `will` feeds maximum health outside of battle.
/// - `craft` caps strategic enemy discards per encounter.
/// - `focus` sets the hand limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantStats {
    pub power: i64,
    pub will: i64,
    pub craft: u32,
    pub focus: u32,
}

impl CombatantStats {
    #[must_use]
    pub const fn new(power: i64, will: i64, craft: u32, focus: u32) -> Self {
        Self { power, will, craft, focus }
    }
}
