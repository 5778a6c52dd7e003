//! Traits describing read-only game data consumed by combat evaluation.
//!
//! Oracles expose per-player rule flags and technology; territory effects are
//! plain data. The [`Env`] aggregate bundles the oracles so strategy builders
//! can reach everything they need without coupling to concrete implementations.
mod error;
mod rules;
mod snapshot;
mod tech;
mod territory;

pub use error::OracleError;
pub use rules::RulesOracle;
pub use snapshot::{PlayerRules, PlayersSnapshot};
pub use tech::TechOracle;
pub use territory::{TerritoryEffect, territory_combat_bonus};

/// Aggregates read-only oracles required by ledgers and combat strategies.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, R, T>
where
    R: RulesOracle + ?Sized,
    T: TechOracle + ?Sized,
{
    rules: Option<&'a R>,
    tech: Option<&'a T>,
}

pub type CombatEnv<'a> = Env<'a, dyn RulesOracle + 'a, dyn TechOracle + 'a>;

impl<'a, R, T> Env<'a, R, T>
where
    R: RulesOracle + ?Sized,
    T: TechOracle + ?Sized,
{
    pub fn new(rules: Option<&'a R>, tech: Option<&'a T>) -> Self {
        Self { rules, tech }
    }

    pub fn with_all(rules: &'a R, tech: &'a T) -> Self {
        Self::new(Some(rules), Some(tech))
    }

    pub fn empty() -> Self {
        Self {
            rules: None,
            tech: None,
        }
    }

    /// Returns the RulesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RulesNotAvailable` if no rules oracle was provided.
    pub fn rules(&self) -> Result<&'a R, OracleError> {
        self.rules.ok_or(OracleError::RulesNotAvailable)
    }

    /// Returns the TechOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TechNotAvailable` if no tech oracle was provided.
    pub fn tech(&self) -> Result<&'a T, OracleError> {
        self.tech.ok_or(OracleError::TechNotAvailable)
    }
}

impl<'a, R, T> Env<'a, R, T>
where
    R: RulesOracle + 'a,
    T: TechOracle + 'a,
{
    /// Converts this environment into a trait-object based `CombatEnv`.
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let rules: Option<&'a dyn RulesOracle> = self.rules.map(|rules| rules as _);
        let tech: Option<&'a dyn TechOracle> = self.tech.map(|tech| tech as _);
        Env::new(rules, tech)
    }
}
