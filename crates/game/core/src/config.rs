use crate::error::{CombatError, ErrorSeverity};

/// How defending strength is reduced in the first round when the attacker's
/// rules grant a dominating first-round attack.
///
/// Friendly support is never applied while the reduction is active; enemy
/// support and territory effects still are. The variants only differ in
/// where the cap sits relative to those later adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FirstRoundDefensePolicy {
    /// Cap the unit's base defense, then layer enemy support and territory on top.
    CapBase(u32),
    /// Compute base + enemy support + territory, then cap the result.
    CapTotal(u32),
}

impl FirstRoundDefensePolicy {
    pub const fn limit(&self) -> u32 {
        match self {
            Self::CapBase(limit) | Self::CapTotal(limit) => *limit,
        }
    }
}

impl Default for FirstRoundDefensePolicy {
    fn default() -> Self {
        Self::CapBase(BattleConfig::DEFAULT_FIRST_ROUND_LIMIT)
    }
}

/// How AA hits are derived from supplied dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DiceMode {
    /// One die per allocated roll, hit below the unit's threshold.
    #[default]
    Standard,
    /// Pooled power: guaranteed hits per full die, one die for the remainder.
    LowLuck,
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of faces on the combat die; upper bound of every strength.
    pub dice_sides: u32,

    /// Reduction applied to defenders facing a dominating first-round attack.
    pub first_round_defense: FirstRoundDefensePolicy,

    /// Resolution mode for AA fire.
    pub dice_mode: DiceMode,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DICE_SIDES: u32 = 6;
    pub const DEFAULT_FIRST_ROUND_LIMIT: u32 = 1;

    pub fn new() -> Self {
        Self {
            dice_sides: Self::DEFAULT_DICE_SIDES,
            first_round_defense: FirstRoundDefensePolicy::default(),
            dice_mode: DiceMode::Standard,
        }
    }

    pub fn with_dice_sides(dice_sides: u32) -> Self {
        Self {
            dice_sides,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn first_round_defense(mut self, policy: FirstRoundDefensePolicy) -> Self {
        self.first_round_defense = policy;
        self
    }

    #[must_use]
    pub fn dice_mode(mut self, mode: DiceMode) -> Self {
        self.dice_mode = mode;
        self
    }

    /// Validate configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_sides == 0 {
            return Err(ConfigError::ZeroDiceSides);
        }

        let limit = self.first_round_defense.limit();
        if limit > self.dice_sides {
            return Err(ConfigError::FirstRoundLimitTooHigh {
                limit,
                dice_sides: self.dice_sides,
            });
        }

        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised by [`BattleConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("dice must have at least one side")]
    ZeroDiceSides,

    #[error("first-round defense limit {limit} exceeds dice sides {dice_sides}")]
    FirstRoundLimitTooHigh { limit: u32, dice_sides: u32 },
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroDiceSides => "CONFIG_ZERO_DICE_SIDES",
            Self::FirstRoundLimitTooHigh { .. } => "CONFIG_FIRST_ROUND_LIMIT_TOO_HIGH",
        }
    }
}
