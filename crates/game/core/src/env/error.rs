//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal: no strategy can be built without knowing player
/// technology and rule flags.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// RulesOracle is not available in the environment.
    #[error("RulesOracle not available")]
    RulesNotAvailable,

    /// TechOracle is not available in the environment.
    #[error("TechOracle not available")]
    TechNotAvailable,
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RulesNotAvailable => "ORACLE_RULES_NOT_AVAILABLE",
            Self::TechNotAvailable => "ORACLE_TECH_NOT_AVAILABLE",
        }
    }
}
