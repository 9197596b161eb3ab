//! Weapons, armor, and the rule resolver they share.
//!
//! - `HitCondition`: card predicate (value range, suit, color, rank)
//! - `HitEffect`: one ordered `condition -> effect` rule
//! - `WeaponDef` / `ArmorDef` / `Equipment`: static definitions
//! - `resolve`: first-match-wins evaluation, the single source of truth
//! - `EquipmentRegistry`: built-in and TOML-loaded catalogs

mod condition;
mod definition;
mod registry;
mod resolver;

pub use condition::HitCondition;
pub use definition::{ArmorDef, Equipment, EquipmentId, EquipmentKind, HitEffect, RuleEffect, WeaponDef};
pub use registry::{validate, EquipmentRegistry};
pub use resolver::{resolve, resolve_rules, Resolution, INSTANT_KILL_MULTIPLIER};
