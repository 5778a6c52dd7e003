//! Common error infrastructure for combat-core.
//!
//! Combat arithmetic never fails: strengths clamp, roll counts floor at zero and
//! support ledgers silently contribute nothing when no rule matches. The errors
//! defined across this crate therefore describe caller mistakes (too few dice,
//! malformed configuration, missing oracles) rather than rule outcomes.
//!
//! Domain-specific errors (e.g. [`DiceError`](crate::combat::DiceError),
//! [`ConfigError`](crate::config::ConfigError)) live next to the code that
//! produces them and implement [`CombatError`] for uniform classification.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: a caller bug; continuing would desynchronize networked peers
/// - **Fatal**: the combat step cannot be evaluated at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero dice sides, first-round cap above the die size
    Validation,

    /// Internal error - the caller violated a structural precondition.
    ///
    /// Examples: dice sequence shorter than the allocated rolls
    Internal,

    /// Fatal error - required collaborators are missing.
    ///
    /// Examples: rules oracle not provided
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a caller bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who must act, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
