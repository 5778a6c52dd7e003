//! Data-backed oracle implementation.
//!
//! [`PlayersSnapshot`] captures the per-player flags the combat rules read and
//! implements both [`RulesOracle`] and [`TechOracle`]. Content loaders produce
//! it from data files; tests build it inline.

use std::collections::BTreeMap;

use super::{RulesOracle, TechOracle};
use crate::state::PlayerId;

/// Rule and technology flags for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerRules {
    pub name: String,
    pub improved_support: bool,
    pub dominating_first_round_attack: bool,
}

/// Snapshot of all players' rule and technology flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayersSnapshot {
    pub players: BTreeMap<PlayerId, PlayerRules>,
}

impl PlayersSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_player(mut self, id: PlayerId, rules: PlayerRules) -> Self {
        self.players.insert(id, rules);
        self
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRules> {
        self.players.get(&id)
    }
}

impl RulesOracle for PlayersSnapshot {
    fn dominating_first_round_attack(&self, player: PlayerId) -> bool {
        self.get(player)
            .is_some_and(|rules| rules.dominating_first_round_attack)
    }
}

impl TechOracle for PlayersSnapshot {
    fn has_improved_support(&self, player: PlayerId) -> bool {
        self.get(player).is_some_and(|rules| rules.improved_support)
    }
}
