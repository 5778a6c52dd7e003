//! Deterministic combat-value rules shared by the runtime and offline tools.
//!
//! `combat-core` computes unit strengths and roll counts under support,
//! territory and first-round rules, allocates AA rolls among competing units
//! and maps caller-supplied dice onto them. Nothing here performs I/O or
//! generates randomness; all state lives for a single combat step.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use combat::{
    AaAllocation, AaCandidate, ActiveAaUnit, BonusType, CombatType, CombatValue,
    CombatValueBuilder, DiceError, DiceResolution, DieOutcome, DieRecord, Dimension, Faction,
    LowLuckResult, RollStrategy, RollValue, StackCap, StrengthStrategy, StrengthValue,
    SupportGiven, SupportGrant, SupportLedger, SupportPair, SupportRule, allocate,
    allocate_aa_rolls, group_by_aa_type, resolve_dice, resolve_low_luck,
    resolve_low_luck_pools,
};
pub use config::{BattleConfig, ConfigError, DiceMode, FirstRoundDefensePolicy};
pub use env::{
    CombatEnv, Env, OracleError, PlayerRules, PlayersSnapshot, RulesOracle, TechOracle,
    TerritoryEffect, territory_combat_bonus,
};
pub use error::{CombatError, ErrorSeverity};
pub use state::{AaStats, PlayerId, Side, Unit, UnitFlags, UnitId, UnitStats, UnitTypeId};
