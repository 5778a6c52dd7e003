//! Territory effect loader.

use std::path::Path;

use combat_core::TerritoryEffect;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Territory effect catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerritoryCatalog {
    pub effects: Vec<TerritoryEffect>,
}

impl TerritoryCatalog {
    /// Resolves effect names, keeping the order of `names`.
    pub fn select(&self, names: &[String]) -> LoadResult<Vec<TerritoryEffect>> {
        names
            .iter()
            .map(|name| {
                self.effects
                    .iter()
                    .find(|effect| &effect.name == name)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown territory effect '{}'", name))
            })
            .collect()
    }
}

/// Loader for territory effects from RON files.
pub struct TerritoryLoader;

impl TerritoryLoader {
    pub fn load(path: &Path) -> LoadResult<TerritoryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TerritoryCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse territory effects RON: {}", e))
    }
}
