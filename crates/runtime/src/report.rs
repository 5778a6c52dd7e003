//! Serializable round output.
//!
//! Reports carry everything peers need to compare a resolved round: per-unit
//! values, support grants, AA allocations and die records. The
//! [`RoundReport::fingerprint`] digest lets networked clients detect
//! divergence without exchanging the full report.
use std::collections::BTreeMap;

use combat_core::{
    ActiveAaUnit, CombatType, DiceResolution, DieOutcome, LowLuckResult, RollValue, Side,
    StrengthValue, SupportGiven, UnitId, UnitTypeId,
};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Strength and rolls of one unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitValue {
    pub unit: UnitId,
    pub kind: UnitTypeId,
    pub strength: StrengthValue,
    pub rolls: RollValue,
}

/// Values of every unit on one side, in evaluation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideValues {
    pub side: Side,
    pub combat_type: CombatType,
    pub units: Vec<UnitValue>,
    pub support_given: SupportGiven,
}

impl SideValues {
    pub fn get(&self, unit: UnitId) -> Option<&UnitValue> {
        self.units.iter().find(|value| value.unit == unit)
    }
}

/// How one AA group's dice were resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AaOutcome {
    Dice(DiceResolution),
    /// One result per die size among the group's units.
    LowLuck(Vec<LowLuckResult>),
}

impl AaOutcome {
    pub fn hits(&self) -> u32 {
        match self {
            Self::Dice(resolution) => resolution.hits(),
            Self::LowLuck(pools) => pools.iter().map(|pool| pool.hits).sum(),
        }
    }

    pub fn consumed(&self) -> usize {
        match self {
            Self::Dice(resolution) => resolution.consumed,
            Self::LowLuck(pools) => pools.iter().map(|pool| pool.consumed).sum(),
        }
    }
}

/// Fire of all AA units sharing one AA type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AaGroupReport {
    pub aa_type: String,
    pub rolls: BTreeMap<UnitId, u32>,
    pub active: Vec<ActiveAaUnit>,
    pub outcome: AaOutcome,
}

/// AA fire of one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AaFireReport {
    pub side: Side,
    pub valid_targets: u32,
    pub groups: Vec<AaGroupReport>,
    pub dice_consumed: usize,
}

impl AaFireReport {
    pub fn hits(&self) -> u32 {
        self.groups.iter().map(|group| group.outcome.hits()).sum()
    }

    pub fn group(&self, aa_type: &str) -> Option<&AaGroupReport> {
        self.groups.iter().find(|group| group.aa_type == aa_type)
    }
}

/// Everything computed for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub aa: Option<AaFireReport>,
    pub attackers: SideValues,
    pub defenders: SideValues,
}

impl RoundReport {
    /// SHA-256 over the report's numeric content in a fixed byte layout.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.round.to_le_bytes());

        if let Some(aa) = &self.aa {
            hash_aa(&mut hasher, aa);
        }
        hash_side(&mut hasher, &self.attackers);
        hash_side(&mut hasher, &self.defenders);

        hasher.finalize().into()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn side_byte(side: Side) -> u8 {
    match side {
        Side::Offense => 0,
        Side::Defense => 1,
    }
}

fn rolls_bytes(rolls: RollValue) -> [u8; 4] {
    rolls.finite().unwrap_or(u32::MAX).to_le_bytes()
}

fn hash_strength(hasher: &mut Sha256, strength: StrengthValue) {
    hasher.update(strength.value().to_le_bytes());
    hasher.update(strength.ceiling().to_le_bytes());
}

fn hash_side(hasher: &mut Sha256, values: &SideValues) {
    hasher.update([side_byte(values.side)]);
    hasher.update(values.combat_type.to_string().as_bytes());
    hasher.update((values.units.len() as u32).to_le_bytes());
    for value in &values.units {
        hasher.update(value.unit.0.to_le_bytes());
        hash_strength(hasher, value.strength);
        hasher.update(rolls_bytes(value.rolls));
    }
    for (supplier, recipients) in &values.support_given {
        for (recipient, amount) in recipients {
            hasher.update(supplier.0.to_le_bytes());
            hasher.update(recipient.0.to_le_bytes());
            hasher.update(amount.to_le_bytes());
        }
    }
}

fn hash_aa(hasher: &mut Sha256, aa: &AaFireReport) {
    hasher.update([side_byte(aa.side)]);
    hasher.update(aa.valid_targets.to_le_bytes());
    for group in &aa.groups {
        hasher.update(group.aa_type.as_bytes());
        for active in &group.active {
            hasher.update(active.unit.0.to_le_bytes());
            hasher.update(active.rolls.to_le_bytes());
            hash_strength(hasher, active.power);
        }
        match &group.outcome {
            AaOutcome::Dice(resolution) => {
                for record in &resolution.records {
                    hasher.update(record.unit.0.to_le_bytes());
                    hasher.update(record.value.to_le_bytes());
                    hasher.update(record.threshold.to_le_bytes());
                    hasher.update([u8::from(record.outcome == DieOutcome::Hit)]);
                }
            }
            AaOutcome::LowLuck(pools) => {
                for pool in pools {
                    hasher.update(pool.dice_sides.to_le_bytes());
                    hasher.update(pool.hits.to_le_bytes());
                    hasher.update(pool.remainder.to_le_bytes());
                }
            }
        }
    }
}
