use crate::state::PlayerId;

/// Oracle providing per-player rule flags that alter combat evaluation.
pub trait RulesOracle: Send + Sync {
    /// Whether units owned by `player` attack with a dominating first round,
    /// limiting the opposing defenders' strength in round one.
    fn dominating_first_round_attack(&self, player: PlayerId) -> bool;
}
