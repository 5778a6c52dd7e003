//! Roll-count strategies.

use super::SupportPair;
use crate::combat::RollValue;
use crate::combat::support::Dimension;
use crate::state::{Side, Unit};

/// How many dice a unit rolls for one combat type and side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollStrategy {
    MainOffense { support: SupportPair },
    MainDefense { support: SupportPair },
    /// AA rolls of the attacking side.
    Aa { support: SupportPair },
    /// AA rolls of the defending side.
    AaDefense { support: SupportPair },
}

impl RollStrategy {
    pub fn rolls(&mut self, unit: &Unit) -> RollValue {
        match self {
            Self::MainOffense { support } => regular_rolls(unit, support, Side::Offense),
            Self::MainDefense { support } => regular_rolls(unit, support, Side::Defense),
            Self::Aa { support } | Self::AaDefense { support } => aa_rolls(unit, support),
        }
    }

    pub fn support(&self) -> &SupportPair {
        match self {
            Self::MainOffense { support }
            | Self::MainDefense { support }
            | Self::Aa { support }
            | Self::AaDefense { support } => support,
        }
    }
}

fn regular_rolls(unit: &Unit, support: &mut SupportPair, side: Side) -> RollValue {
    let rolls = unit
        .stats
        .base_rolls(side)
        .saturating_add(support.friendly(unit, Dimension::Roll))
        .saturating_add(support.enemy(unit, Dimension::Roll));
    RollValue::Finite(rolls.max(0) as u32)
}

/// Infinite attackers keep their sentinel and consume no roll support.
fn aa_rolls(unit: &Unit, support: &mut SupportPair) -> RollValue {
    let Some(aa) = &unit.aa else {
        return RollValue::Finite(0);
    };
    if aa.is_infinite() {
        return RollValue::Infinite;
    }
    RollValue::Finite(aa.max_aa_attacks.max(0) as u32)
        .add(support.friendly(unit, Dimension::AaRoll))
        .add(support.enemy(unit, Dimension::AaRoll))
}
