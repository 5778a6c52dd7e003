//! Strength (hit threshold) strategies.

use super::SupportPair;
use crate::combat::StrengthValue;
use crate::combat::support::Dimension;
use crate::config::FirstRoundDefensePolicy;
use crate::env::{TerritoryEffect, territory_combat_bonus};
use crate::state::{Side, Unit};

/// How a unit's hit threshold is computed for one combat type and side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrengthStrategy {
    /// Attacking in a land battle: sea units with a bombard value fire at it.
    MainOffense {
        support: SupportPair,
        territory: Vec<TerritoryEffect>,
        dice_sides: u32,
    },
    /// Attacking where bombardment does not apply.
    NormalOffense {
        support: SupportPair,
        territory: Vec<TerritoryEffect>,
        dice_sides: u32,
    },
    /// Defending; `first_round` is set when the reduction is in force this round.
    NormalDefense {
        support: SupportPair,
        territory: Vec<TerritoryEffect>,
        dice_sides: u32,
        first_round: Option<FirstRoundDefensePolicy>,
    },
    AirBattleOffense {
        support: SupportPair,
        dice_sides: u32,
    },
    AirBattleDefense {
        support: SupportPair,
        dice_sides: u32,
    },
    /// Shore bombardment step.
    Bombardment {
        support: SupportPair,
        territory: Vec<TerritoryEffect>,
        dice_sides: u32,
    },
    /// AA fire from the attacking side.
    Aa {
        support: SupportPair,
        dice_sides: u32,
    },
    /// AA fire from the defending side.
    AaDefense {
        support: SupportPair,
        dice_sides: u32,
    },
}

impl StrengthStrategy {
    pub fn strength(&mut self, unit: &Unit) -> StrengthValue {
        match self {
            Self::MainOffense {
                support,
                territory,
                dice_sides,
            } => {
                let base = match unit.stats.bombard {
                    Some(bombard) if unit.is_sea() => bombard,
                    _ => offense_base(unit),
                };
                layered(unit, base, support, territory, Side::Offense, *dice_sides)
            }
            Self::NormalOffense {
                support,
                territory,
                dice_sides,
            } => layered(
                unit,
                offense_base(unit),
                support,
                territory,
                Side::Offense,
                *dice_sides,
            ),
            Self::NormalDefense {
                support,
                territory,
                dice_sides,
                first_round,
            } => {
                let defense = unit.stats.base_strength(Side::Defense);
                let base = StrengthValue::new(*dice_sides, defense);
                let terrain = territory_combat_bonus(&unit.kind, territory, Side::Defense);
                match first_round {
                    Some(FirstRoundDefensePolicy::CapBase(limit)) => base
                        .cap(*limit)
                        .add(support.enemy(unit, Dimension::Strength))
                        .add(terrain),
                    Some(FirstRoundDefensePolicy::CapTotal(limit)) => base
                        .add(support.enemy(unit, Dimension::Strength))
                        .add(terrain)
                        .cap(*limit),
                    None => base
                        .add(support.friendly(unit, Dimension::Strength))
                        .add(support.enemy(unit, Dimension::Strength))
                        .add(terrain),
                }
            }
            Self::AirBattleOffense {
                support,
                dice_sides,
            } => StrengthValue::new(*dice_sides, unit.stats.air_attack)
                .add(support.friendly(unit, Dimension::Strength))
                .add(support.enemy(unit, Dimension::Strength)),
            Self::AirBattleDefense {
                support,
                dice_sides,
            } => StrengthValue::new(*dice_sides, unit.stats.air_defense)
                .add(support.friendly(unit, Dimension::Strength))
                .add(support.enemy(unit, Dimension::Strength)),
            Self::Bombardment {
                support,
                territory,
                dice_sides,
            } => {
                let base = unit.stats.bombard.unwrap_or(unit.stats.attack);
                layered(unit, base, support, territory, Side::Offense, *dice_sides)
            }
            Self::Aa {
                support,
                dice_sides,
            } => aa_strength(unit, support, Side::Offense, *dice_sides),
            Self::AaDefense {
                support,
                dice_sides,
            } => aa_strength(unit, support, Side::Defense, *dice_sides),
        }
    }

    pub fn support(&self) -> &SupportPair {
        match self {
            Self::MainOffense { support, .. }
            | Self::NormalOffense { support, .. }
            | Self::NormalDefense { support, .. }
            | Self::AirBattleOffense { support, .. }
            | Self::AirBattleDefense { support, .. }
            | Self::Bombardment { support, .. }
            | Self::Aa { support, .. }
            | Self::AaDefense { support, .. } => support,
        }
    }
}

/// Attack value plus the marine bonus for units that landed amphibiously.
fn offense_base(unit: &Unit) -> i32 {
    let attack = unit.stats.base_strength(Side::Offense);
    if unit.was_amphibious() && unit.stats.marine_bonus != 0 {
        attack.saturating_add(unit.stats.marine_bonus)
    } else {
        attack
    }
}

fn layered(
    unit: &Unit,
    base: i32,
    support: &mut SupportPair,
    territory: &[TerritoryEffect],
    side: Side,
    dice_sides: u32,
) -> StrengthValue {
    StrengthValue::new(dice_sides, base)
        .add(support.friendly(unit, Dimension::Strength))
        .add(support.enemy(unit, Dimension::Strength))
        .add(territory_combat_bonus(&unit.kind, territory, side))
}

fn aa_strength(unit: &Unit, support: &mut SupportPair, side: Side, dice_sides: u32) -> StrengthValue {
    let Some(aa) = &unit.aa else {
        return StrengthValue::zero(dice_sides);
    };
    let ceiling = aa.die_sides(side).unwrap_or(dice_sides);
    StrengthValue::new(ceiling, aa.strength(side))
        .add(support.friendly(unit, Dimension::AaStrength))
        .add(support.enemy(unit, Dimension::AaStrength))
}
