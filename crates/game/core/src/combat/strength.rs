//! Clamped strength and roll-count values.

use std::fmt;

/// A pip threshold bounded to `0..=ceiling`.
///
/// The ceiling is normally the game's dice sides; AA units may override it with
/// their own die size. Every operation returns a new clamped value, so
/// arithmetic can never leave the bounds regardless of how extreme the applied
/// bonuses are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrengthValue {
    ceiling: u32,
    value: u32,
}

impl StrengthValue {
    pub fn new(ceiling: u32, value: i32) -> Self {
        Self {
            ceiling,
            value: clamp_to(value as i64, ceiling),
        }
    }

    pub const fn zero(ceiling: u32) -> Self {
        Self { ceiling, value: 0 }
    }

    /// Returns `clamp(value + delta, 0, ceiling)`.
    #[must_use]
    pub fn add(self, delta: i32) -> Self {
        Self {
            ceiling: self.ceiling,
            value: clamp_to(self.value as i64 + delta as i64, self.ceiling),
        }
    }

    /// Lowers the value to at most `limit`.
    #[must_use]
    pub fn cap(self, limit: u32) -> Self {
        Self {
            ceiling: self.ceiling,
            value: self.value.min(limit),
        }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for StrengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.ceiling)
    }
}

fn clamp_to(value: i64, ceiling: u32) -> u32 {
    value.clamp(0, ceiling as i64) as u32
}

/// Number of dice a unit rolls.
///
/// `Infinite` is the AA sentinel meaning "one roll per remaining valid target";
/// it absorbs any bonus applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollValue {
    Finite(u32),
    Infinite,
}

impl RollValue {
    /// Interprets a raw attribute value, where `-1` is the infinite sentinel
    /// and other negatives floor at zero.
    pub fn from_raw(raw: i32) -> Self {
        if raw == -1 {
            Self::Infinite
        } else {
            Self::Finite(raw.max(0) as u32)
        }
    }

    /// Returns `max(0, rolls + delta)`; infinite stays infinite.
    #[must_use]
    pub fn add(self, delta: i32) -> Self {
        match self {
            Self::Finite(rolls) => Self::Finite((rolls as i64 + delta as i64).max(0) as u32),
            Self::Infinite => Self::Infinite,
        }
    }

    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    pub const fn finite(&self) -> Option<u32> {
        match self {
            Self::Finite(rolls) => Some(*rolls),
            Self::Infinite => None,
        }
    }
}

impl fmt::Display for RollValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(rolls) => write!(f, "{rolls}"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}
