//! Support rule descriptors.

use std::collections::BTreeSet;

use crate::state::{PlayerId, Side, UnitTypeId};

/// Whether a rule supports the supplier's own side or hinders the enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    Allied,
    Enemy,
}

/// Which computed value a rule modifies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Dimension {
    /// Number of dice rolled in regular combat.
    Roll,
    /// Hit threshold in regular combat.
    Strength,
    /// Number of AA dice rolled.
    AaRoll,
    /// AA hit threshold.
    AaStrength,
}

/// Per-target cap on instances drawn from one bonus type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackCap {
    Limited(u32),
    Unlimited,
}

impl StackCap {
    pub const fn allows(&self, granted: u32) -> bool {
        match self {
            Self::Limited(cap) => granted < *cap,
            Self::Unlimited => true,
        }
    }
}

impl Default for StackCap {
    fn default() -> Self {
        Self::Limited(1)
    }
}

/// Named stacking group shared by one or more rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusType {
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stack_cap: StackCap,
}

impl BonusType {
    pub fn new(key: impl Into<String>, stack_cap: StackCap) -> Self {
        Self {
            key: key.into(),
            stack_cap,
        }
    }
}

/// One way a unit type grants a bonus to other units.
///
/// Rules are validated by the loader before reaching combat; here they are
/// immutable descriptors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportRule {
    pub id: String,
    /// Side the supplying units must be fighting on.
    pub side: Side,
    pub faction: Faction,
    pub dimension: Dimension,
    /// Signed bonus per instance; hindrances are negative.
    pub bonus: i32,
    /// Instances each supplying unit contributes.
    #[cfg_attr(feature = "serde", serde(default = "default_instances"))]
    pub instances_per_unit: u32,
    pub bonus_type: BonusType,
    /// Doubles the instances of suppliers whose owner holds improved support.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_tech: bool,
    /// Unit type whose units supply the support.
    pub supplier_type: UnitTypeId,
    /// Unit types eligible to receive the support.
    pub target_types: BTreeSet<UnitTypeId>,
    /// Players whose units may supply the support.
    pub players: BTreeSet<PlayerId>,
}

#[cfg(feature = "serde")]
fn default_instances() -> u32 {
    1
}

impl SupportRule {
    /// Creates a rule with one instance per unit and a fresh bonus type named after the rule.
    pub fn new(
        id: impl Into<String>,
        supplier_type: impl Into<UnitTypeId>,
        side: Side,
        faction: Faction,
        dimension: Dimension,
        bonus: i32,
    ) -> Self {
        let id = id.into();
        Self {
            bonus_type: BonusType::new(id.clone(), StackCap::default()),
            id,
            side,
            faction,
            dimension,
            bonus,
            instances_per_unit: 1,
            requires_tech: false,
            supplier_type: supplier_type.into(),
            target_types: BTreeSet::new(),
            players: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn bonus_type(mut self, bonus_type: BonusType) -> Self {
        self.bonus_type = bonus_type;
        self
    }

    #[must_use]
    pub fn instances_per_unit(mut self, instances: u32) -> Self {
        self.instances_per_unit = instances;
        self
    }

    #[must_use]
    pub fn requires_tech(mut self, requires_tech: bool) -> Self {
        self.requires_tech = requires_tech;
        self
    }

    #[must_use]
    pub fn targets<I, T>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<UnitTypeId>,
    {
        self.target_types.extend(kinds.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn players(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        self.players.extend(players);
        self
    }

    pub fn applies_to(&self, kind: &UnitTypeId) -> bool {
        self.target_types.contains(kind)
    }

    pub fn includes_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}
