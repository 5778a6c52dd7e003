use crate::state::PlayerId;

/// Oracle exposing the technologies researched by each player.
pub trait TechOracle: Send + Sync {
    /// Whether `player` holds the technology doubling tech-gated support.
    fn has_improved_support(&self, player: PlayerId) -> bool;
}
