//! Territory effects: per-unit-type combat deltas granted by terrain.

use std::collections::BTreeMap;

use crate::state::{Side, UnitTypeId};

/// A named terrain effect modifying the strength of specific unit types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerritoryEffect {
    pub name: String,
    pub offense: BTreeMap<UnitTypeId, i32>,
    pub defense: BTreeMap<UnitTypeId, i32>,
}

impl TerritoryEffect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, side: Side, kind: impl Into<UnitTypeId>, delta: i32) -> Self {
        match side {
            Side::Offense => self.offense.insert(kind.into(), delta),
            Side::Defense => self.defense.insert(kind.into(), delta),
        };
        self
    }

    pub fn bonus(&self, kind: &UnitTypeId, side: Side) -> i32 {
        let table = match side {
            Side::Offense => &self.offense,
            Side::Defense => &self.defense,
        };
        table.get(kind).copied().unwrap_or(0)
    }
}

/// Sum of all effect deltas applying to `kind` on `side`.
pub fn territory_combat_bonus(kind: &UnitTypeId, effects: &[TerritoryEffect], side: Side) -> i32 {
    effects
        .iter()
        .fold(0i32, |total, effect| total.saturating_add(effect.bonus(kind, side)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_sum_across_effects() {
        let effects = vec![
            TerritoryEffect::new("mountain")
                .with_bonus(Side::Defense, "infantry", 1)
                .with_bonus(Side::Offense, "armour", -1),
            TerritoryEffect::new("fortress").with_bonus(Side::Defense, "infantry", 2),
        ];
        let infantry = UnitTypeId::new("infantry");
        let armour = UnitTypeId::new("armour");

        assert_eq!(territory_combat_bonus(&infantry, &effects, Side::Defense), 3);
        assert_eq!(territory_combat_bonus(&infantry, &effects, Side::Offense), 0);
        assert_eq!(territory_combat_bonus(&armour, &effects, Side::Offense), -1);
    }

    #[test]
    fn no_effects_no_bonus() {
        assert_eq!(
            territory_combat_bonus(&UnitTypeId::new("fighter"), &[], Side::Offense),
            0
        );
    }
}
