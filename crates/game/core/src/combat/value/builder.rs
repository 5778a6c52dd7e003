use super::{CombatType, CombatValue, RollStrategy, StrengthStrategy, SupportPair};
use crate::combat::support::{Faction, SupportLedger, SupportRule};
use crate::config::{BattleConfig, FirstRoundDefensePolicy};
use crate::env::{CombatEnv, OracleError, RulesOracle, TerritoryEffect};
use crate::state::{Side, Unit};

/// Assembles a [`CombatValue`] from the battle's units, rules and terrain.
///
/// Friendly support comes from `friendly_units` on the evaluated side; enemy
/// support comes from `enemy_units` fighting on the opposite side.
#[derive(Clone, Debug)]
pub struct CombatValueBuilder<'a> {
    combat_type: CombatType,
    side: Side,
    friendly_units: &'a [Unit],
    enemy_units: &'a [Unit],
    rules: &'a [SupportRule],
    territory: &'a [TerritoryEffect],
    land_battle: bool,
    round: u32,
}

impl<'a> CombatValueBuilder<'a> {
    pub fn new(combat_type: CombatType, side: Side) -> Self {
        Self {
            combat_type,
            side,
            friendly_units: &[],
            enemy_units: &[],
            rules: &[],
            territory: &[],
            land_battle: true,
            round: 1,
        }
    }

    #[must_use]
    pub fn friendly_units(mut self, units: &'a [Unit]) -> Self {
        self.friendly_units = units;
        self
    }

    #[must_use]
    pub fn enemy_units(mut self, units: &'a [Unit]) -> Self {
        self.enemy_units = units;
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: &'a [SupportRule]) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn territory(mut self, effects: &'a [TerritoryEffect]) -> Self {
        self.territory = effects;
        self
    }

    #[must_use]
    pub fn land_battle(mut self, land_battle: bool) -> Self {
        self.land_battle = land_battle;
        self
    }

    #[must_use]
    pub fn round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Builds the strategies, computing both support ledgers.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when the environment lacks the tech oracle, or
    /// the rules oracle for defensive main combat.
    pub fn build(
        self,
        env: &CombatEnv<'_>,
        config: &BattleConfig,
    ) -> Result<CombatValue, OracleError> {
        let tech = env.tech()?;
        let friendly = SupportLedger::new(
            self.friendly_units,
            self.rules,
            self.side,
            Faction::Allied,
            tech,
        );
        let enemy = SupportLedger::new(
            self.enemy_units,
            self.rules,
            self.side.opposite(),
            Faction::Enemy,
            tech,
        );

        let strength_dimension = self.combat_type.strength_dimension();
        let roll_dimension = self.combat_type.roll_dimension();
        let strength_support = SupportPair::new(
            friendly.filter(strength_dimension),
            enemy.filter(strength_dimension),
        );
        let roll_support =
            SupportPair::new(friendly.filter(roll_dimension), enemy.filter(roll_dimension));

        let dice_sides = config.dice_sides;
        let territory = self.territory.to_vec();

        let strength = match (self.combat_type, self.side) {
            (CombatType::Main, Side::Offense) if self.land_battle => StrengthStrategy::MainOffense {
                support: strength_support,
                territory,
                dice_sides,
            },
            (CombatType::Main, Side::Offense) => StrengthStrategy::NormalOffense {
                support: strength_support,
                territory,
                dice_sides,
            },
            (CombatType::Main | CombatType::Bombardment, Side::Defense) => {
                StrengthStrategy::NormalDefense {
                    support: strength_support,
                    territory,
                    dice_sides,
                    first_round: self.first_round_policy(env.rules()?, config),
                }
            }
            (CombatType::AirBattle, Side::Offense) => StrengthStrategy::AirBattleOffense {
                support: strength_support,
                dice_sides,
            },
            (CombatType::AirBattle, Side::Defense) => StrengthStrategy::AirBattleDefense {
                support: strength_support,
                dice_sides,
            },
            (CombatType::Bombardment, Side::Offense) => StrengthStrategy::Bombardment {
                support: strength_support,
                territory,
                dice_sides,
            },
            (CombatType::Aa, Side::Offense) => StrengthStrategy::Aa {
                support: strength_support,
                dice_sides,
            },
            (CombatType::Aa, Side::Defense) => StrengthStrategy::AaDefense {
                support: strength_support,
                dice_sides,
            },
        };

        let rolls = match (self.combat_type, self.side) {
            (CombatType::Aa, Side::Offense) => RollStrategy::Aa {
                support: roll_support,
            },
            (CombatType::Aa, Side::Defense) => RollStrategy::AaDefense {
                support: roll_support,
            },
            (_, Side::Offense) => RollStrategy::MainOffense {
                support: roll_support,
            },
            (_, Side::Defense) => RollStrategy::MainDefense {
                support: roll_support,
            },
        };

        tracing::debug!(
            combat_type = %self.combat_type,
            side = %self.side,
            round = self.round,
            friendly_rules = friendly.rule_count(),
            enemy_rules = enemy.rule_count(),
            "combat value built"
        );

        Ok(CombatValue::from_parts(
            self.combat_type,
            self.side,
            strength,
            rolls,
        ))
    }

    /// The reduction applies to defenders in round 1 when any opposing unit's
    /// owner has a dominating first-round attack.
    fn first_round_policy(
        &self,
        rules: &(impl RulesOracle + ?Sized),
        config: &BattleConfig,
    ) -> Option<FirstRoundDefensePolicy> {
        let dominated = self.round == 1
            && self
                .enemy_units
                .iter()
                .any(|unit| rules.dominating_first_round_attack(unit.owner));
        dominated.then_some(config.first_round_defense)
    }
}
