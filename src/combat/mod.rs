//! Damage model.
//!
//! Turns a resolved equipment effect into numbers: `attack_damage` for
//! the attacking side, `mitigate` for the defending side.

mod damage;

pub use damage::{attack_damage, mitigate, AttackDamage, DamageTarget, Mitigation};
