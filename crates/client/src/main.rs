//! Combat simulator binary.
//!
//! Loads a battle from a data directory, resolves one round with the
//! scenario's pre-generated dice and prints the result.
//!
//! # Examples
//!
//! ```bash
//! # Text summary of the demo landing
//! cargo run -p combat-client
//!
//! # JSON report with debug logging
//! COMBAT_LOG_JSON=1 RUST_LOG=debug cargo run -p combat-client
//! ```
mod config;
mod logging;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_runtime::{AaFireReport, CombatStep, RoundReport, SideValues};

use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        scenario = %config.scenario,
        "Starting combat simulation"
    );

    let battle = ContentFactory::new(&config.data_dir)
        .load_battle(&config.scenario)
        .with_context(|| format!("loading scenario '{}'", config.scenario))?;
    let step = CombatStep::from_content(&battle)?;

    let aa_targets = config.aa_targets.unwrap_or(battle.aa_targets);
    let report = step.run_round(aa_targets, &battle.dice).inspect_err(|err| {
        let severity = err.severity();
        tracing::error!(
            severity = severity.as_str(),
            caller_bug = severity.is_internal(),
            "Round failed: {err}"
        );
    })?;

    if config.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&battle.name, &report);
    }

    tracing::info!(
        fingerprint = %hex::encode(report.fingerprint()),
        "Round complete"
    );
    Ok(())
}

fn print_summary(name: &str, report: &RoundReport) {
    println!("== {} (round {}) ==", name, report.round);
    if let Some(aa) = &report.aa {
        print_aa(aa);
    }
    print_side("Attackers", &report.attackers);
    print_side("Defenders", &report.defenders);
}

fn print_aa(aa: &AaFireReport) {
    println!(
        "AA fire ({}) at {} targets: {} hits",
        aa.side,
        aa.valid_targets,
        aa.hits()
    );
    for group in &aa.groups {
        let rolls: u32 = group.active.iter().map(|unit| unit.rolls).sum();
        println!(
            "  {:<8} {} rolls, {} hits",
            group.aa_type,
            rolls,
            group.outcome.hits()
        );
    }
}

fn print_side(label: &str, values: &SideValues) {
    println!("{} ({}):", label, values.combat_type);
    for value in &values.units {
        println!(
            "  {:>4} {:<12} strength {:>5}  rolls {}",
            value.unit, value.kind, value.strength, value.rolls
        );
    }
}
