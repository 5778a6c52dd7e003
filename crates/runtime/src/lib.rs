//! Runtime orchestration for one combat step.
//!
//! This crate wires `combat-core` strategies, the AA pass and the dice
//! resolver into a [`CombatStep`] that callers drive with pre-generated dice.
//! Units are always evaluated in ascending id order so that every peer
//! replaying the same battle consumes support identically.
//!
//! Modules are organized by responsibility:
//! - [`step`] hosts the orchestrator and builder
//! - [`oracle`] bundles rule and technology oracles
//! - [`report`] holds the serializable round output and its fingerprint
//! - [`error`] unifies failures surfaced to callers
pub mod error;
pub mod oracle;
pub mod report;
pub mod step;

pub use error::{Result, RuntimeError};
pub use oracle::OracleManager;
pub use report::{AaFireReport, AaGroupReport, AaOutcome, RoundReport, SideValues, UnitValue};
pub use step::{CombatStep, CombatStepBuilder};
