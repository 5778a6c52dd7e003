//! Dice resolution for allocated AA rolls.
//!
//! Dice are generated by the caller and consumed strictly in order. Faces are
//! zero-indexed: a threshold of `T` hits on values `0..T`.

use std::collections::BTreeMap;

use super::aa::ActiveAaUnit;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::UnitId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum DieOutcome {
    Hit,
    Miss,
}

/// One consumed die.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieRecord {
    pub unit: UnitId,
    pub value: u32,
    pub threshold: u32,
    pub outcome: DieOutcome,
}

impl DieRecord {
    pub fn is_hit(&self) -> bool {
        self.outcome == DieOutcome::Hit
    }
}

/// Ordered records of every die consumed, one per allocated roll.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceResolution {
    pub records: Vec<DieRecord>,
    /// Dice taken from the front of the supplied sequence.
    pub consumed: usize,
}

impl DiceResolution {
    pub fn hits(&self) -> u32 {
        self.records.iter().filter(|record| record.is_hit()).count() as u32
    }

    pub fn hits_by(&self, unit: UnitId) -> u32 {
        self.records
            .iter()
            .filter(|record| record.unit == unit && record.is_hit())
            .count() as u32
    }

    pub fn outcomes(&self) -> impl Iterator<Item = DieOutcome> + '_ {
        self.records.iter().map(|record| record.outcome)
    }
}

/// Low-luck outcome: guaranteed hits plus at most one remainder die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowLuckResult {
    /// Die size the pooled power is measured against.
    pub dice_sides: u32,
    pub hits: u32,
    /// Power left over after whole dice; rolled against a single die.
    pub remainder: u32,
    pub consumed: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("{required} dice required but only {supplied} supplied")]
    NotEnoughDice { required: usize, supplied: usize },

    #[error("dice must have at least one side")]
    ZeroDiceSides,
}

impl CombatError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughDice { .. } => ErrorSeverity::Internal,
            Self::ZeroDiceSides => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughDice { .. } => "DICE_NOT_ENOUGH",
            Self::ZeroDiceSides => "DICE_ZERO_SIDES",
        }
    }
}

/// Assigns consecutive dice to `active` units and classifies each against the
/// unit's threshold.
///
/// Extra dice beyond the allocated rolls are left unconsumed.
///
/// # Errors
///
/// Returns [`DiceError::NotEnoughDice`] when `dice` is shorter than the total
/// allocated rolls. Nothing is resolved in that case.
pub fn resolve_dice(dice: &[u32], active: &[ActiveAaUnit]) -> Result<DiceResolution, DiceError> {
    let required: usize = active.iter().map(|unit| unit.rolls as usize).sum();
    if dice.len() < required {
        return Err(DiceError::NotEnoughDice {
            required,
            supplied: dice.len(),
        });
    }

    let mut values = dice.iter().copied();
    let mut records = Vec::with_capacity(required);
    for unit in active {
        let threshold = unit.power.value();
        for value in values.by_ref().take(unit.rolls as usize) {
            let outcome = if value < threshold {
                DieOutcome::Hit
            } else {
                DieOutcome::Miss
            };
            records.push(DieRecord {
                unit: unit.unit,
                value,
                threshold,
                outcome,
            });
        }
    }

    Ok(DiceResolution {
        records,
        consumed: required,
    })
}

/// Resolves pooled AA power without per-roll dice.
///
/// Every full `dice_sides` of power is a hit; a remainder is rolled on one die
/// and hits when the die is below it.
///
/// # Errors
///
/// Returns [`DiceError::ZeroDiceSides`] for a zero-sided die and
/// [`DiceError::NotEnoughDice`] when a remainder needs a die and none is given.
pub fn resolve_low_luck(
    total_power: u32,
    dice_sides: u32,
    dice: &[u32],
) -> Result<LowLuckResult, DiceError> {
    if dice_sides == 0 {
        return Err(DiceError::ZeroDiceSides);
    }

    let guaranteed = total_power / dice_sides;
    let remainder = total_power % dice_sides;
    if remainder == 0 {
        return Ok(LowLuckResult {
            dice_sides,
            hits: guaranteed,
            remainder,
            consumed: 0,
        });
    }

    let Some(&die) = dice.first() else {
        return Err(DiceError::NotEnoughDice {
            required: 1,
            supplied: 0,
        });
    };

    Ok(LowLuckResult {
        dice_sides,
        hits: guaranteed + u32::from(die < remainder),
        remainder,
        consumed: 1,
    })
}

/// Low-luck resolution of allocated rolls, pooling power per die size.
///
/// Each unit's power is measured against its own ceiling, so units rolling
/// different dice form separate pools. Pools resolve in ascending die size,
/// taking remainder dice from the front of `dice`. Pools without power are
/// skipped.
///
/// # Errors
///
/// Returns [`DiceError::NotEnoughDice`] when fewer dice are supplied than
/// pools with a remainder. Nothing is resolved in that case.
pub fn resolve_low_luck_pools(
    active: &[ActiveAaUnit],
    dice: &[u32],
) -> Result<Vec<LowLuckResult>, DiceError> {
    let mut pools: BTreeMap<u32, u32> = BTreeMap::new();
    for unit in active {
        let power = unit.power.value().saturating_mul(unit.rolls);
        let pool = pools.entry(unit.power.ceiling()).or_insert(0);
        *pool = pool.saturating_add(power);
    }
    pools.retain(|_, power| *power > 0);

    let required = pools
        .iter()
        .filter(|(sides, power)| *power % *sides != 0)
        .count();
    if dice.len() < required {
        return Err(DiceError::NotEnoughDice {
            required,
            supplied: dice.len(),
        });
    }

    let mut consumed = 0;
    let mut results = Vec::with_capacity(pools.len());
    for (sides, power) in pools {
        let result = resolve_low_luck(power, sides, &dice[consumed..])?;
        consumed += result.consumed;
        results.push(result);
    }
    Ok(results)
}
