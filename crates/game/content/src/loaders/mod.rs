//! Content loaders for reading battle data from files.

pub mod config;
pub mod factory;
pub mod players;
pub mod scenario;
pub mod support;
pub mod territory;
pub mod units;

pub use config::ConfigLoader;
pub use factory::{BattleContent, ContentFactory};
pub use players::PlayersLoader;
pub use scenario::{ScenarioLoader, ScenarioSpec, UnitSpawn};
pub use support::SupportLoader;
pub use territory::{TerritoryCatalog, TerritoryLoader};
pub use units::{UnitCatalog, UnitLoader, UnitTypeSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
