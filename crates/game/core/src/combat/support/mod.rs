//! Support: bonuses one unit grants to others.
//!
//! - [`SupportRule`]: immutable descriptor loaded from game data
//! - [`SupportLedger`]: per-round availability, consumption and audit record

mod ledger;
mod rule;

pub use ledger::{SupportGiven, SupportGrant, SupportLedger};
pub use rule::{BonusType, Dimension, Faction, StackCap, SupportRule};
