//! Content factory for assembling battles from data files.

use std::path::{Path, PathBuf};

use combat_core::{BattleConfig, PlayersSnapshot, SupportRule, TerritoryEffect, Unit};

use crate::loaders::{
    ConfigLoader, LoadResult, PlayersLoader, ScenarioLoader, ScenarioSpec, SupportLoader,
    TerritoryCatalog, TerritoryLoader, UnitCatalog, UnitLoader,
};

/// Everything needed to evaluate one combat round.
#[derive(Debug, Clone)]
pub struct BattleContent {
    pub name: String,
    pub config: BattleConfig,
    pub players: PlayersSnapshot,
    pub rules: Vec<SupportRule>,
    pub territory: Vec<TerritoryEffect>,
    pub attackers: Vec<Unit>,
    pub defenders: Vec<Unit>,
    pub round: u32,
    pub land_battle: bool,
    pub aa_targets: u32,
    pub dice: Vec<u32>,
}

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── units.ron
/// ├── support.ron
/// ├── territory.ron
/// ├── players.ron
/// └── scenarios/
///     └── landing.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the unit type catalog from `units.ron`.
    pub fn load_units(&self) -> LoadResult<UnitCatalog> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load support rules from `support.ron`, validated against `units`.
    pub fn load_support(&self, units: &UnitCatalog) -> LoadResult<Vec<SupportRule>> {
        SupportLoader::load(&self.data_dir.join("support.ron"), units)
    }

    /// Load territory effects from `territory.ron`.
    pub fn load_territory(&self) -> LoadResult<TerritoryCatalog> {
        TerritoryLoader::load(&self.data_dir.join("territory.ron"))
    }

    /// Load player flags from `players.ron`.
    pub fn load_players(&self) -> LoadResult<PlayersSnapshot> {
        PlayersLoader::load(&self.data_dir.join("players.ron"))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Load every file and instantiate the named scenario.
    pub fn load_battle(&self, scenario: &str) -> LoadResult<BattleContent> {
        let config = self.load_config()?;
        let units = self.load_units()?;
        let rules = self.load_support(&units)?;
        let territory = self.load_territory()?;
        let players = self.load_players()?;
        let spec = self.load_scenario(scenario)?;

        let (attackers, defenders) = spec.instantiate(&units)?;
        let aa_targets = spec
            .aa_targets
            .unwrap_or_else(|| attackers.iter().filter(|unit| unit.is_air()).count() as u32);

        Ok(BattleContent {
            name: spec.name.clone(),
            config,
            players,
            rules,
            territory: territory.select(&spec.territory)?,
            attackers,
            defenders,
            round: spec.round,
            land_battle: spec.land_battle,
            aa_targets,
            dice: spec.dice,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{FirstRoundDefensePolicy, PlayerId, UnitId};

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "config.toml", "first_round_defense = { cap_base = 1 }\n");
        write(
            root,
            "units.ron",
            r#"(unit_types: [
                (id: "infantry", stats: (attack: 1, defense: 2)),
                (id: "artillery", stats: (attack: 2, defense: 2)),
                (id: "fighter", stats: (attack: 3, defense: 4), air: true),
            ])"#,
        );
        write(
            root,
            "support.ron",
            r#"(rules: [(
                id: "artillery",
                side: Offense,
                faction: Allied,
                dimension: Strength,
                bonus: 1,
                bonus_type: (key: "artillery"),
                supplier_type: "artillery",
                target_types: ["infantry"],
                players: [1],
            )])"#,
        );
        write(
            root,
            "territory.ron",
            r#"(effects: [(name: "hills", defense: { "infantry": 1 })])"#,
        );
        write(root, "players.ron", r#"(players: { 1: (name: "red") })"#);
        write(
            root,
            "scenarios/probe.ron",
            r#"(
                name: "probe",
                territory: ["hills"],
                attackers: [
                    (kind: "infantry", owner: 1),
                    (kind: "fighter", owner: 1, count: 2),
                ],
                defenders: [(kind: "infantry", owner: 2)],
                dice: [1, 2, 3],
            )"#,
        );
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn load_battle_assembles_all_files() {
        let dir = data_dir();
        let battle = ContentFactory::new(dir.path()).load_battle("probe").unwrap();

        assert_eq!(battle.name, "probe");
        assert_eq!(
            battle.config.first_round_defense,
            FirstRoundDefensePolicy::CapBase(1)
        );
        assert_eq!(battle.rules.len(), 1);
        assert_eq!(battle.territory[0].name, "hills");
        assert_eq!(battle.attackers.len(), 3);
        assert_eq!(battle.defenders[0].id, UnitId(4));
        assert_eq!(battle.aa_targets, 2);
        assert_eq!(battle.dice, vec![1, 2, 3]);
        assert!(battle.players.get(PlayerId(1)).is_some());
    }

    #[test]
    fn missing_scenario_is_an_error() {
        let dir = data_dir();
        let err = ContentFactory::new(dir.path())
            .load_battle("absent")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
