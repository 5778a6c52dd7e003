//! AA roll allocation.
//!
//! AA units share a limited number of valid targets. Competing units are served
//! strongest first, infinite attackers winning power ties, and each takes as
//! many rolls as its maximum allows from the targets still unclaimed. Overstack
//! units roll their full allotment regardless of targets.

use std::collections::BTreeMap;

use super::value::CombatValue;
use super::{RollValue, StrengthValue};
use crate::state::{Unit, UnitId};

/// One AA-capable unit as seen by the allocation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AaCandidate {
    pub unit: UnitId,
    pub power: StrengthValue,
    /// Maximum rolls this round; infinite means one per remaining target.
    pub rolls: RollValue,
    pub overstack: bool,
}

impl AaCandidate {
    pub fn new(unit: UnitId, power: StrengthValue, rolls: RollValue) -> Self {
        Self {
            unit,
            power,
            rolls,
            overstack: false,
        }
    }

    #[must_use]
    pub fn overstack(mut self, overstack: bool) -> Self {
        self.overstack = overstack;
        self
    }

    /// Overstack only matters for finite attackers.
    fn fires_unconditionally(&self) -> bool {
        self.overstack && !self.rolls.is_infinite()
    }
}

/// A unit that received at least one roll, in dice consumption order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveAaUnit {
    pub unit: UnitId,
    pub power: StrengthValue,
    pub rolls: u32,
}

/// Result of one allocation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AaAllocation {
    /// Rolls per candidate, zero included.
    pub rolls: BTreeMap<UnitId, u32>,
    /// Units with rolls: competing units by descending power, then overstack
    /// units in input order.
    pub active: Vec<ActiveAaUnit>,
}

impl AaAllocation {
    fn grant(&mut self, candidate: &AaCandidate, rolls: u32) {
        self.rolls.insert(candidate.unit, rolls);
        if rolls > 0 {
            self.active.push(ActiveAaUnit {
                unit: candidate.unit,
                power: candidate.power,
                rolls,
            });
        }
    }

    pub fn rolls_for(&self, unit: UnitId) -> u32 {
        self.rolls.get(&unit).copied().unwrap_or(0)
    }

    /// Dice needed to resolve this allocation.
    pub fn total_rolls(&self) -> u32 {
        self.active
            .iter()
            .fold(0u32, |total, unit| total.saturating_add(unit.rolls))
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Distributes `valid_targets` among `candidates` as rolls.
pub fn allocate(candidates: &[AaCandidate], valid_targets: u32) -> AaAllocation {
    let (overstack, mut competing): (Vec<&AaCandidate>, Vec<&AaCandidate>) = candidates
        .iter()
        .partition(|candidate| candidate.fires_unconditionally());

    // Stable: equal candidates keep input order.
    competing.sort_by(|a, b| {
        b.power
            .value()
            .cmp(&a.power.value())
            .then_with(|| b.rolls.is_infinite().cmp(&a.rolls.is_infinite()))
    });

    let mut allocation = AaAllocation::default();
    let mut remaining = valid_targets;

    for candidate in competing {
        let granted = match candidate.rolls {
            RollValue::Finite(max) => max.min(remaining),
            RollValue::Infinite => remaining,
        };
        remaining -= granted;
        allocation.grant(candidate, granted);
    }

    for candidate in overstack {
        allocation.grant(candidate, candidate.rolls.finite().unwrap_or(0));
    }

    allocation
}

/// Evaluates `units` with `value` in the given order and allocates their rolls.
///
/// Power and rolls draw from the strategy's support ledgers, so callers must
/// pass units in a stable order.
pub fn allocate_aa_rolls(
    units: &[Unit],
    valid_targets: u32,
    value: &mut CombatValue,
) -> AaAllocation {
    let candidates: Vec<AaCandidate> = units
        .iter()
        .map(|unit| {
            let (power, rolls) = value.power_and_rolls(unit);
            AaCandidate::new(unit.id, power, rolls).overstack(unit.may_overstack_aa())
        })
        .collect();

    let allocation = allocate(&candidates, valid_targets);

    tracing::debug!(
        candidates = candidates.len(),
        valid_targets,
        active = allocation.active.len(),
        rolls = allocation.total_rolls(),
        "aa rolls allocated"
    );

    allocation
}

/// Groups AA-capable units by AA type, keeping input order inside each group.
pub fn group_by_aa_type(units: &[Unit]) -> BTreeMap<&str, Vec<&Unit>> {
    let mut groups: BTreeMap<&str, Vec<&Unit>> = BTreeMap::new();
    for unit in units {
        if let Some(aa) = &unit.aa {
            groups.entry(aa.aa_type.as_str()).or_default().push(unit);
        }
    }
    groups
}
