//! Battle scenario loader.

use std::path::Path;

use combat_core::{PlayerId, Unit, UnitId, UnitTypeId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, UnitCatalog, read_file};

/// A group of identical units placed on one side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSpawn {
    pub kind: UnitTypeId,
    pub owner: PlayerId,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Landed from transports this turn.
    #[serde(default)]
    pub amphibious: bool,
}

fn default_count() -> u32 {
    1
}

fn default_round() -> u32 {
    1
}

fn default_land_battle() -> bool {
    true
}

/// One battle as written in `scenarios/<name>.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default = "default_land_battle")]
    pub land_battle: bool,
    /// Names of territory effects from `territory.ron`.
    #[serde(default)]
    pub territory: Vec<String>,
    pub attackers: Vec<UnitSpawn>,
    pub defenders: Vec<UnitSpawn>,
    /// Air units the AA fire may target; defaults to the attacking air units.
    #[serde(default)]
    pub aa_targets: Option<u32>,
    /// Pre-generated die faces, consumed in order.
    #[serde(default)]
    pub dice: Vec<u32>,
}

impl ScenarioSpec {
    /// Spawns both sides, numbering units from 1 with attackers first.
    pub fn instantiate(&self, catalog: &UnitCatalog) -> LoadResult<(Vec<Unit>, Vec<Unit>)> {
        let mut next_id = 1u32;
        let mut spawn_side = |spawns: &[UnitSpawn]| -> LoadResult<Vec<Unit>> {
            let mut units = Vec::new();
            for spawn in spawns {
                for _ in 0..spawn.count {
                    units.push(catalog.spawn(
                        UnitId(next_id),
                        &spawn.kind,
                        spawn.owner,
                        spawn.amphibious,
                    )?);
                    next_id += 1;
                }
            }
            Ok(units)
        };

        let attackers = spawn_side(&self.attackers)?;
        let defenders = spawn_side(&self.defenders)?;
        Ok((attackers, defenders))
    }
}

/// Loader for battle scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}
