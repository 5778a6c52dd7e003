//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from oracle access, configuration and dice resolution so
//! clients can bubble them up with consistent context.
use combat_core::{CombatError, ConfigError, DiceError, ErrorSeverity, OracleError, UnitId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat step requires oracles to be configured before building")]
    MissingOracles,

    #[error("unit {0} appears more than once in the battle")]
    DuplicateUnit(UnitId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Dice(#[from] DiceError),
}

impl RuntimeError {
    /// Severity of the underlying failure.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingOracles => ErrorSeverity::Fatal,
            Self::DuplicateUnit(_) => ErrorSeverity::Validation,
            Self::Config(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::Dice(err) => err.severity(),
        }
    }
}
