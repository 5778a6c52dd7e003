//! Combat value computation and AA resolution.
//!
//! Everything here is synchronous and deterministic given the unit order the
//! caller supplies:
//!
//! - [`strength`]: clamped strength and roll-count values
//! - [`support`]: support rules and round-scoped ledgers
//! - [`value`]: strength/roll strategies per combat type and side
//! - [`aa`]: distribution of valid targets among AA units
//! - [`dice`]: mapping caller-supplied dice onto allocated rolls

pub mod aa;
pub mod dice;
pub mod strength;
pub mod support;
pub mod value;

pub use aa::{AaAllocation, AaCandidate, ActiveAaUnit, allocate, allocate_aa_rolls, group_by_aa_type};
pub use dice::{
    DiceError, DiceResolution, DieOutcome, DieRecord, LowLuckResult, resolve_dice,
    resolve_low_luck, resolve_low_luck_pools,
};
pub use strength::{RollValue, StrengthValue};
pub use support::{
    BonusType, Dimension, Faction, StackCap, SupportGiven, SupportGrant, SupportLedger,
    SupportRule,
};
pub use value::{
    CombatType, CombatValue, CombatValueBuilder, RollStrategy, StrengthStrategy, SupportPair,
};
