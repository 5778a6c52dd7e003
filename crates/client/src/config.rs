//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulator run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `config.toml`, the RON catalogs and `scenarios/`.
    pub data_dir: PathBuf,
    pub scenario: String,
    /// Print the full report as JSON instead of the text summary.
    pub json: bool,
    /// Also write logs to `<dir>/combat-sim.log`.
    pub log_dir: Option<PathBuf>,
    /// Overrides the scenario's AA target count.
    pub aa_targets: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: "landing".to_owned(),
            json: false,
            log_dir: None,
            aa_targets: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - data directory (default: `data`)
    /// - `COMBAT_SCENARIO` - scenario name under `scenarios/` (default: `landing`)
    /// - `COMBAT_LOG_JSON` - print the report as JSON (default: false)
    /// - `COMBAT_LOG_DIR` - directory for a log file (default: stderr only)
    /// - `COMBAT_AA_TARGETS` - override the AA target count
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("COMBAT_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(scenario) = read_env::<String>("COMBAT_SCENARIO") {
            config.scenario = scenario;
        }
        if let Some(json) = read_env_bool("COMBAT_LOG_JSON") {
            config.json = json;
        }
        config.log_dir = read_env::<PathBuf>("COMBAT_LOG_DIR");
        config.aa_targets = read_env::<u32>("COMBAT_AA_TARGETS");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn defaults_point_at_demo_data() {
        let config = SimConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.scenario, "landing");
        assert!(!config.json);
    }
}
