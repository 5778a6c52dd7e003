//! Unit attribute views.

use bitflags::bitflags;

use super::common::{PlayerId, Side, UnitId, UnitTypeId};

bitflags! {
    /// Boolean traits of a unit relevant to combat evaluation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        const SEA              = 1 << 0;
        const AIR              = 1 << 1;
        const WAS_AMPHIBIOUS   = 1 << 2;
        const MAY_OVERSTACK_AA = 1 << 3;
    }
}

/// Regular combat attributes of a unit type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitStats {
    pub attack: i32,
    pub defense: i32,
    pub attack_rolls: i32,
    pub defense_rolls: i32,
    /// Bonus added to attack when the unit landed amphibiously (0 = not a marine).
    pub marine_bonus: i32,
    /// Strength used instead of attack when a sea unit fires into a land battle.
    pub bombard: Option<i32>,
    pub air_attack: i32,
    pub air_defense: i32,
}

impl UnitStats {
    pub fn new(attack: i32, defense: i32) -> Self {
        Self {
            attack,
            defense,
            ..Self::default()
        }
    }

    pub const fn base_strength(&self, side: Side) -> i32 {
        match side {
            Side::Offense => self.attack,
            Side::Defense => self.defense,
        }
    }

    pub const fn base_rolls(&self, side: Side) -> i32 {
        match side {
            Side::Offense => self.attack_rolls,
            Side::Defense => self.defense_rolls,
        }
    }
}

/// Anti-aircraft attributes of a unit type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AaStats {
    /// AA strength when the unit is on the attacking side.
    pub offensive_attack_aa: i32,
    /// AA strength when the unit is defending.
    pub attack_aa: i32,
    /// Rolls per round; `-1` means one roll per remaining valid target.
    pub max_aa_attacks: i32,
    /// Die size overriding the global dice sides for offensive AA fire.
    pub offensive_die_sides: Option<u32>,
    /// Die size overriding the global dice sides for defensive AA fire.
    pub defensive_die_sides: Option<u32>,
    /// Units of the same AA type fire together as one group.
    pub aa_type: String,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            attack: 0,
            defense: 0,
            attack_rolls: 1,
            defense_rolls: 1,
            marine_bonus: 0,
            bombard: None,
            air_attack: 0,
            air_defense: 0,
        }
    }
}

impl AaStats {
    pub const INFINITE_ATTACKS: i32 = -1;
    pub const DEFAULT_AA_TYPE: &'static str = "AA";

    pub fn new(attack_aa: i32, max_aa_attacks: i32) -> Self {
        Self {
            offensive_attack_aa: attack_aa,
            attack_aa,
            max_aa_attacks,
            ..Self::default()
        }
    }

    pub const fn strength(&self, side: Side) -> i32 {
        match side {
            Side::Offense => self.offensive_attack_aa,
            Side::Defense => self.attack_aa,
        }
    }

    pub const fn die_sides(&self, side: Side) -> Option<u32> {
        match side {
            Side::Offense => self.offensive_die_sides,
            Side::Defense => self.defensive_die_sides,
        }
    }

    pub const fn is_infinite(&self) -> bool {
        self.max_aa_attacks == Self::INFINITE_ATTACKS
    }
}

impl Default for AaStats {
    fn default() -> Self {
        Self {
            offensive_attack_aa: 0,
            attack_aa: 0,
            max_aa_attacks: 1,
            offensive_die_sides: None,
            defensive_die_sides: None,
            aa_type: Self::DEFAULT_AA_TYPE.to_owned(),
        }
    }
}

/// A single unit present in the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitTypeId,
    pub owner: PlayerId,
    pub stats: UnitStats,
    pub aa: Option<AaStats>,
    pub flags: UnitFlags,
}

impl Unit {
    pub fn new(id: UnitId, kind: impl Into<UnitTypeId>, owner: PlayerId, stats: UnitStats) -> Self {
        Self {
            id,
            kind: kind.into(),
            owner,
            stats,
            aa: None,
            flags: UnitFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_aa(mut self, aa: AaStats) -> Self {
        self.aa = Some(aa);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: UnitFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_sea(&self) -> bool {
        self.flags.contains(UnitFlags::SEA)
    }

    pub fn is_air(&self) -> bool {
        self.flags.contains(UnitFlags::AIR)
    }

    pub fn was_amphibious(&self) -> bool {
        self.flags.contains(UnitFlags::WAS_AMPHIBIOUS)
    }

    pub fn may_overstack_aa(&self) -> bool {
        self.flags.contains(UnitFlags::MAY_OVERSTACK_AA)
    }

    pub fn is_aa(&self) -> bool {
        self.aa.is_some()
    }
}
