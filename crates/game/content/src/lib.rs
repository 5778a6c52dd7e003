//! Data-driven battle content and loaders.
//!
//! This crate turns RON/TOML data files into `combat-core` types:
//! - Unit type catalogs (data-driven via RON)
//! - Support rules (data-driven via RON, validated against the unit catalog)
//! - Territory effects (data-driven via RON)
//! - Player technology and rule flags (data-driven via RON)
//! - Battle scenarios (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Rule validation happens here so that combat evaluation can treat every
//! rule as well-formed.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BattleContent, ConfigLoader, ContentFactory, PlayersLoader, ScenarioLoader, ScenarioSpec,
    SupportLoader, TerritoryCatalog, TerritoryLoader, UnitCatalog, UnitLoader, UnitSpawn, UnitTypeSpec,
};
