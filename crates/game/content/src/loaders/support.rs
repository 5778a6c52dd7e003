//! Support rule loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{StackCap, SupportRule};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, UnitCatalog, read_file};

/// File layout of `support.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SupportFile {
    rules: Vec<SupportRule>,
}

/// Loader for support rules from RON files.
pub struct SupportLoader;

impl SupportLoader {
    /// Load rules and validate them against `units`.
    pub fn load(path: &Path, units: &UnitCatalog) -> LoadResult<Vec<SupportRule>> {
        let content = read_file(path)?;
        Self::parse(&content, units)
    }

    pub fn parse(content: &str, units: &UnitCatalog) -> LoadResult<Vec<SupportRule>> {
        let file: SupportFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse support rules RON: {}", e))?;
        Self::validate(&file.rules, units)?;
        Ok(file.rules)
    }

    /// Rejects rules that reference unknown unit types, reuse an id, or
    /// disagree on the stacking cap of a shared bonus type.
    pub fn validate(rules: &[SupportRule], units: &UnitCatalog) -> LoadResult<()> {
        let mut caps: BTreeMap<&str, StackCap> = BTreeMap::new();
        let mut ids = std::collections::BTreeSet::new();

        for rule in rules {
            if !ids.insert(rule.id.as_str()) {
                anyhow::bail!("Duplicate support rule '{}'", rule.id);
            }
            if !units.contains(&rule.supplier_type) {
                anyhow::bail!(
                    "Support rule '{}' names unknown supplier type '{}'",
                    rule.id,
                    rule.supplier_type
                );
            }
            if let Some(target) = rule.target_types.iter().find(|kind| !units.contains(kind)) {
                anyhow::bail!(
                    "Support rule '{}' targets unknown unit type '{}'",
                    rule.id,
                    target
                );
            }
            if rule.instances_per_unit == 0 {
                anyhow::bail!("Support rule '{}' grants no instances", rule.id);
            }

            let key = rule.bonus_type.key.as_str();
            match caps.get(key) {
                Some(cap) if *cap != rule.bonus_type.stack_cap => anyhow::bail!(
                    "Bonus type '{}' has conflicting stack caps ({:?} vs {:?})",
                    key,
                    cap,
                    rule.bonus_type.stack_cap
                ),
                Some(_) => {}
                None => {
                    caps.insert(key, rule.bonus_type.stack_cap);
                }
            }
        }

        Ok(())
    }
}
