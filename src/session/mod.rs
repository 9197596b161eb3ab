//! Session layer: profiles, stored records and the battle service.

pub mod profile;
pub mod store;
pub mod service;

pub use profile::{PlayerProfile, SessionId, SessionRecord};
pub use store::{MemoryStore, SessionStore};
pub use service::{AdvanceResponse, BattleReport, BattleService};
