//! Combat value strategies.
//!
//! A [`CombatValue`] pairs the strength and roll strategy for one combat type
//! and side. Each strategy owns the support ledgers it consumes, so evaluating
//! units mutates the strategy and the query order decides who is supported.
//! Build values through [`CombatValueBuilder`], which selects the variants and
//! filters the ledgers by dimension.

mod builder;
mod roll;
mod strength;

pub use builder::CombatValueBuilder;
pub use roll::RollStrategy;
pub use strength::StrengthStrategy;

use crate::combat::support::{Dimension, SupportGiven, SupportLedger};
use crate::combat::{RollValue, StrengthValue};
use crate::state::{Side, Unit};

/// Battle step a combat value is computed for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatType {
    /// Regular land or sea combat.
    Main,
    AirBattle,
    Bombardment,
    /// Anti-aircraft fire preceding the main round.
    Aa,
}

impl CombatType {
    pub const fn strength_dimension(&self) -> Dimension {
        match self {
            Self::Aa => Dimension::AaStrength,
            _ => Dimension::Strength,
        }
    }

    pub const fn roll_dimension(&self) -> Dimension {
        match self {
            Self::Aa => Dimension::AaRoll,
            _ => Dimension::Roll,
        }
    }
}

/// Friendly and enemy ledgers consumed together by one strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportPair {
    pub friendly: SupportLedger,
    pub enemy: SupportLedger,
}

impl SupportPair {
    pub fn new(friendly: SupportLedger, enemy: SupportLedger) -> Self {
        Self { friendly, enemy }
    }

    pub fn friendly(&mut self, unit: &Unit, dimension: Dimension) -> i32 {
        self.friendly.give_support_to_unit(unit, dimension).sum()
    }

    pub fn enemy(&mut self, unit: &Unit, dimension: Dimension) -> i32 {
        self.enemy.give_support_to_unit(unit, dimension).sum()
    }

    fn merge_given_into(&self, out: &mut SupportGiven) {
        for ledger in [&self.friendly, &self.enemy] {
            for (supplier, recipients) in ledger.support_given() {
                let entry = out.entry(*supplier).or_default();
                for (recipient, amount) in recipients {
                    let total = entry.entry(*recipient).or_insert(0);
                    *total = total.saturating_add(*amount);
                }
            }
        }
    }
}

/// Strength and roll computation for one side in one combat step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatValue {
    combat_type: CombatType,
    side: Side,
    strength: StrengthStrategy,
    rolls: RollStrategy,
}

impl CombatValue {
    pub fn from_parts(
        combat_type: CombatType,
        side: Side,
        strength: StrengthStrategy,
        rolls: RollStrategy,
    ) -> Self {
        Self {
            combat_type,
            side,
            strength,
            rolls,
        }
    }

    pub fn combat_type(&self) -> CombatType {
        self.combat_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn strength_strategy(&self) -> &StrengthStrategy {
        &self.strength
    }

    pub fn roll_strategy(&self) -> &RollStrategy {
        &self.rolls
    }

    pub fn strength(&mut self, unit: &Unit) -> StrengthValue {
        self.strength.strength(unit)
    }

    pub fn rolls(&mut self, unit: &Unit) -> RollValue {
        self.rolls.rolls(unit)
    }

    /// Strength then rolls, consuming support in that order.
    pub fn power_and_rolls(&mut self, unit: &Unit) -> (StrengthValue, RollValue) {
        let strength = self.strength(unit);
        let rolls = self.rolls(unit);
        (strength, rolls)
    }

    /// Union of every support grant recorded by the strength and roll ledgers.
    pub fn support_given(&self) -> SupportGiven {
        let mut given = SupportGiven::new();
        self.strength.support().merge_given_into(&mut given);
        self.rolls.support().merge_given_into(&mut given);
        given
    }
}
