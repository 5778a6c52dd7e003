//! Participant data consumed by the combat rules.
//!
//! Units are plain attribute views supplied by the surrounding game. Nothing in
//! this module is mutated by combat evaluation; per-round mutable state lives in
//! [`SupportLedger`](crate::combat::SupportLedger) instead.
pub mod types;

pub use types::{AaStats, PlayerId, Side, Unit, UnitFlags, UnitId, UnitStats, UnitTypeId};
