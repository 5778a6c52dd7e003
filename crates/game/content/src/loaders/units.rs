//! Unit type catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{AaStats, PlayerId, Unit, UnitFlags, UnitId, UnitStats, UnitTypeId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One unit type as written in `units.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitTypeSpec {
    pub id: UnitTypeId,
    #[serde(default)]
    pub stats: UnitStats,
    #[serde(default)]
    pub aa: Option<AaStats>,
    #[serde(default)]
    pub sea: bool,
    #[serde(default)]
    pub air: bool,
    #[serde(default)]
    pub may_overstack_aa: bool,
}

impl UnitTypeSpec {
    pub fn flags(&self) -> UnitFlags {
        let mut flags = UnitFlags::empty();
        flags.set(UnitFlags::SEA, self.sea);
        flags.set(UnitFlags::AIR, self.air);
        flags.set(UnitFlags::MAY_OVERSTACK_AA, self.may_overstack_aa);
        flags
    }
}

/// File layout of `units.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitFile {
    unit_types: Vec<UnitTypeSpec>,
}

/// Unit types indexed by id.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    types: BTreeMap<UnitTypeId, UnitTypeSpec>,
}

impl UnitCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_specs(specs: Vec<UnitTypeSpec>) -> LoadResult<Self> {
        let mut types = BTreeMap::new();
        for spec in specs {
            let id = spec.id.clone();
            if types.insert(id.clone(), spec).is_some() {
                anyhow::bail!("Duplicate unit type '{}'", id);
            }
        }
        Ok(Self { types })
    }

    pub fn get(&self, kind: &UnitTypeId) -> Option<&UnitTypeSpec> {
        self.types.get(kind)
    }

    pub fn contains(&self, kind: &UnitTypeId) -> bool {
        self.types.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Creates a battle unit of type `kind`.
    pub fn spawn(
        &self,
        id: UnitId,
        kind: &UnitTypeId,
        owner: PlayerId,
        amphibious: bool,
    ) -> LoadResult<Unit> {
        let spec = self
            .get(kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown unit type '{}'", kind))?;

        let mut flags = spec.flags();
        flags.set(UnitFlags::WAS_AMPHIBIOUS, amphibious);

        let mut unit = Unit::new(id, kind.clone(), owner, spec.stats.clone()).with_flags(flags);
        if let Some(aa) = &spec.aa {
            unit = unit.with_aa(aa.clone());
        }
        Ok(unit)
    }
}

/// Loader for unit type catalogs from RON files.
pub struct UnitLoader;

impl UnitLoader {
    pub fn load(path: &Path) -> LoadResult<UnitCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<UnitCatalog> {
        let file: UnitFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;
        UnitCatalog::from_specs(file.unit_types)
    }
}
