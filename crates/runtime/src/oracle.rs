//! Runtime wrapper around the rule and technology oracles.
//!
//! Player data is immutable for the duration of a step; the manager hands out
//! [`CombatEnv`] views on demand.
use std::sync::Arc;

use combat_core::{CombatEnv, Env, PlayersSnapshot, RulesOracle, TechOracle};

/// Manages oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    rules: Arc<dyn RulesOracle>,
    tech: Arc<dyn TechOracle>,
}

impl OracleManager {
    pub fn new(rules: Arc<dyn RulesOracle>, tech: Arc<dyn TechOracle>) -> Self {
        Self { rules, tech }
    }

    /// Backs both oracles with one players snapshot.
    pub fn from_players(players: PlayersSnapshot) -> Self {
        let players = Arc::new(players);
        Self {
            rules: players.clone(),
            tech: players,
        }
    }

    /// Converts the oracle manager into a `CombatEnv` for combat-core.
    pub fn as_combat_env(&self) -> CombatEnv<'_> {
        Env::with_all(self.rules.as_ref(), self.tech.as_ref())
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager").finish_non_exhaustive()
    }
}
