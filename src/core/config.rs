//! Battle configuration.
//!
//! Tunables that are policy rather than rules: enemy level scaling,
//! the boss instant-kill policy and the hand-limit floor. Loaded from
//! TOML; every field has a default so partial files are accepted.
//!
//! ```
//! use card_battle::core::BattleConfig;
//!
//! let config = BattleConfig::from_toml_str("health_per_level = 6").unwrap();
//! assert_eq!(config.health_per_level, 6);
//! assert!(!config.instant_kill_bosses);
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Engine-wide battle settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Whether instant-kill weapon effects apply to boss enemies.
    pub instant_kill_bosses: bool,

    /// Multiplier used in place of an instant kill against a boss
    /// when `instant_kill_bosses` is off.
    pub boss_instant_kill_multiplier: f64,

    /// Extra enemy health per encounter level.
    pub health_per_level: i64,

    /// Extra enemy power granted every `levels_per_power` levels.
    pub power_per_level: i64,

    /// Level interval for power scaling. Zero disables power scaling.
    pub levels_per_power: u32,

    /// Lowest hand limit any combatant gets, whatever its focus.
    pub min_hand_limit: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            instant_kill_bosses: false,
            boss_instant_kill_multiplier: 1.0,
            health_per_level: 4,
            power_per_level: 1,
            levels_per_power: 2,
            min_hand_limit: 1,
        }
    }
}

impl BattleConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Hand limit for a combatant with the given focus.
    #[must_use]
    pub fn hand_limit(&self, focus: u32) -> usize {
        (focus as usize).max(self.min_hand_limit)
    }
}
