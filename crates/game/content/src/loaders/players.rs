//! Player rule and technology loader.

use std::path::Path;

use combat_core::PlayersSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for player flags from RON files.
pub struct PlayersLoader;

impl PlayersLoader {
    pub fn load(path: &Path) -> LoadResult<PlayersSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PlayersSnapshot> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse players RON: {}", e))
    }
}
