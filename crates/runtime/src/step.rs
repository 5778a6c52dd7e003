//! One combat step over a fixed set of participants.
//!
//! [`CombatStep`] owns the battle inputs and builds fresh strategies (and
//! therefore fresh support ledgers) for every query, so repeated queries on
//! the same step return identical results.

use std::collections::BTreeSet;

use combat_content::BattleContent;
use combat_core::{
    BattleConfig, CombatType, CombatValue, CombatValueBuilder, DiceMode, Side, SupportRule,
    TerritoryEffect, Unit, allocate_aa_rolls, group_by_aa_type, resolve_dice,
    resolve_low_luck_pools,
};

use crate::error::{Result, RuntimeError};
use crate::oracle::OracleManager;
use crate::report::{AaFireReport, AaGroupReport, AaOutcome, RoundReport, SideValues, UnitValue};

/// Inputs of one combat round, with both sides sorted by unit id.
#[derive(Debug, Clone)]
pub struct CombatStep {
    config: BattleConfig,
    oracles: OracleManager,
    rules: Vec<SupportRule>,
    territory: Vec<TerritoryEffect>,
    attackers: Vec<Unit>,
    defenders: Vec<Unit>,
    round: u32,
    land_battle: bool,
}

impl CombatStep {
    /// Create a new combat step builder
    pub fn builder() -> CombatStepBuilder {
        CombatStepBuilder::new()
    }

    /// Builds a step from loaded battle content.
    pub fn from_content(content: &BattleContent) -> Result<Self> {
        Self::builder()
            .config(content.config.clone())
            .oracles(OracleManager::from_players(content.players.clone()))
            .rules(content.rules.clone())
            .territory(content.territory.clone())
            .attackers(content.attackers.clone())
            .defenders(content.defenders.clone())
            .round(content.round)
            .land_battle(content.land_battle)
            .build()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Units fighting on `side`, in evaluation order.
    pub fn units(&self, side: Side) -> &[Unit] {
        match side {
            Side::Offense => &self.attackers,
            Side::Defense => &self.defenders,
        }
    }

    /// Builds a fresh strategy for `side`; the opposite side supplies enemy support.
    pub fn combat_value(&self, side: Side, combat_type: CombatType) -> Result<CombatValue> {
        let env = self.oracles.as_combat_env();
        let value = CombatValueBuilder::new(combat_type, side)
            .friendly_units(self.units(side))
            .enemy_units(self.units(side.opposite()))
            .rules(&self.rules)
            .territory(&self.territory)
            .land_battle(self.land_battle)
            .round(self.round)
            .build(&env, &self.config)?;
        Ok(value)
    }

    /// Strength and rolls of every unit on `side`.
    pub fn unit_values(&self, side: Side, combat_type: CombatType) -> Result<SideValues> {
        let mut value = self.combat_value(side, combat_type)?;

        let units = self
            .units(side)
            .iter()
            .map(|unit| {
                let (strength, rolls) = value.power_and_rolls(unit);
                tracing::debug!(
                    unit = %unit.id,
                    kind = %unit.kind,
                    %side,
                    %strength,
                    %rolls,
                    "unit evaluated"
                );
                UnitValue {
                    unit: unit.id,
                    kind: unit.kind.clone(),
                    strength,
                    rolls,
                }
            })
            .collect();

        Ok(SideValues {
            side,
            combat_type,
            units,
            support_given: value.support_given(),
        })
    }

    /// Fires every AA group on `side` at `valid_targets`, consuming `dice` in order.
    ///
    /// Groups fire in AA type order and share one set of support ledgers.
    pub fn fire_aa(&self, side: Side, valid_targets: u32, dice: &[u32]) -> Result<AaFireReport> {
        let mut value = self.combat_value(side, CombatType::Aa)?;
        let mut consumed = 0usize;
        let mut groups = Vec::new();

        for (aa_type, members) in group_by_aa_type(self.units(side)) {
            let members: Vec<Unit> = members.into_iter().cloned().collect();
            let allocation = allocate_aa_rolls(&members, valid_targets, &mut value);
            if allocation.is_empty() {
                continue;
            }

            let remaining = &dice[consumed..];
            let outcome = match self.config.dice_mode {
                DiceMode::Standard => AaOutcome::Dice(resolve_dice(remaining, &allocation.active)?),
                DiceMode::LowLuck => {
                    AaOutcome::LowLuck(resolve_low_luck_pools(&allocation.active, remaining)?)
                }
            };
            consumed += outcome.consumed();

            tracing::debug!(
                aa_type,
                %side,
                rolls = allocation.total_rolls(),
                hits = outcome.hits(),
                "aa group fired"
            );

            groups.push(AaGroupReport {
                aa_type: aa_type.to_owned(),
                rolls: allocation.rolls,
                active: allocation.active,
                outcome,
            });
        }

        let report = AaFireReport {
            side,
            valid_targets,
            groups,
            dice_consumed: consumed,
        };

        tracing::info!(
            %side,
            valid_targets,
            groups = report.groups.len(),
            hits = report.hits(),
            dice = consumed,
            mode = %self.config.dice_mode,
            "aa fire resolved"
        );

        Ok(report)
    }

    /// Defending AA fires at `aa_targets` first, then both sides are evaluated
    /// for main combat.
    pub fn run_round(&self, aa_targets: u32, dice: &[u32]) -> Result<RoundReport> {
        let aa = if self.defenders.iter().any(Unit::is_aa) && aa_targets > 0 {
            Some(self.fire_aa(Side::Defense, aa_targets, dice)?)
        } else {
            None
        };

        let attackers = self.unit_values(Side::Offense, CombatType::Main)?;
        let defenders = self.unit_values(Side::Defense, CombatType::Main)?;

        tracing::info!(
            round = self.round,
            attackers = attackers.units.len(),
            defenders = defenders.units.len(),
            aa_hits = aa.as_ref().map_or(0, AaFireReport::hits),
            "combat round evaluated"
        );

        Ok(RoundReport {
            round: self.round,
            aa,
            attackers,
            defenders,
        })
    }
}

/// Builder for [`CombatStep`].
#[derive(Debug, Default)]
pub struct CombatStepBuilder {
    config: BattleConfig,
    oracles: Option<OracleManager>,
    rules: Vec<SupportRule>,
    territory: Vec<TerritoryEffect>,
    attackers: Vec<Unit>,
    defenders: Vec<Unit>,
    round: Option<u32>,
    land_battle: Option<bool>,
}

impl CombatStepBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override battle configuration
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn rules(mut self, rules: Vec<SupportRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn territory(mut self, effects: Vec<TerritoryEffect>) -> Self {
        self.territory = effects;
        self
    }

    pub fn attackers(mut self, units: Vec<Unit>) -> Self {
        self.attackers = units;
        self
    }

    pub fn defenders(mut self, units: Vec<Unit>) -> Self {
        self.defenders = units;
        self
    }

    /// Round number, starting at 1 (default)
    pub fn round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// Whether the battle is on land (default: true)
    pub fn land_battle(mut self, land_battle: bool) -> Self {
        self.land_battle = Some(land_battle);
        self
    }

    /// Validates the inputs and sorts both sides by unit id.
    pub fn build(self) -> Result<CombatStep> {
        self.config.validate()?;
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let mut seen = BTreeSet::new();
        if let Some(unit) = self
            .attackers
            .iter()
            .chain(&self.defenders)
            .find(|unit| !seen.insert(unit.id))
        {
            return Err(RuntimeError::DuplicateUnit(unit.id));
        }

        let mut attackers = self.attackers;
        let mut defenders = self.defenders;
        attackers.sort_by_key(|unit| unit.id);
        defenders.sort_by_key(|unit| unit.id);

        Ok(CombatStep {
            config: self.config,
            oracles,
            rules: self.rules,
            territory: self.territory,
            attackers,
            defenders,
            round: self.round.unwrap_or(1),
            land_battle: self.land_battle.unwrap_or(true),
        })
    }
}
