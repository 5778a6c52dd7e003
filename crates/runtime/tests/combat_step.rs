use std::path::PathBuf;

use combat_content::ContentFactory;
use combat_core::{
    AaStats, BattleConfig, CombatError, CombatType, DiceError, DiceMode, ErrorSeverity,
    FirstRoundDefensePolicy, PlayerId, PlayerRules, PlayersSnapshot, RollValue, Side, Unit,
    UnitId, UnitStats,
};
use combat_runtime::{AaOutcome, CombatStep, OracleManager, RuntimeError};

const ALLIES: PlayerId = PlayerId(1);
const AXIS: PlayerId = PlayerId(2);

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn landing() -> (CombatStep, u32, Vec<u32>) {
    let battle = ContentFactory::new(data_dir())
        .load_battle("landing")
        .expect("demo data loads");
    let step = CombatStep::from_content(&battle).expect("demo battle is valid");
    (step, battle.aa_targets, battle.dice)
}

fn strength_of(values: &combat_runtime::SideValues, id: u32) -> u32 {
    values.get(UnitId(id)).expect("unit evaluated").strength.value()
}

#[test]
fn landing_round_matches_hand_computed_values() {
    let (step, aa_targets, dice) = landing();
    assert_eq!(aa_targets, 3);

    let report = step.run_round(aa_targets, &dice).unwrap();

    let aa = report.aa.as_ref().expect("defenders carry AA");
    assert_eq!(aa.dice_consumed, 5);
    assert_eq!(aa.hits(), 3);

    let guns = aa.group("AA").unwrap();
    assert_eq!(guns.rolls[&UnitId(14)], 3);
    assert_eq!(guns.active[0].power.value(), 2);
    assert_eq!(guns.outcome.hits(), 2);

    let flak = aa.group("flak").unwrap();
    assert_eq!(flak.rolls[&UnitId(15)], 2);
    assert_eq!(flak.active[0].power.ceiling(), 8);
    assert_eq!(flak.active[0].power.value(), 3);
    assert_eq!(flak.outcome.hits(), 1);

    let attackers = &report.attackers;
    let expected = [(1, 3), (2, 3), (3, 1), (4, 1), (5, 2), (6, 3), (7, 4), (8, 3), (10, 4)];
    for (id, strength) in expected {
        assert_eq!(strength_of(attackers, id), strength, "attacker {id}");
    }
    assert_eq!(attackers.get(UnitId(10)).unwrap().rolls, RollValue::Finite(2));
    assert_eq!(attackers.support_given[&UnitId(5)].len(), 2);

    let defenders = &report.defenders;
    assert_eq!(strength_of(defenders, 11), 2);
    assert_eq!(strength_of(defenders, 12), 3);
    assert_eq!(strength_of(defenders, 13), 3);
    assert_eq!(defenders.support_given[&UnitId(6)][&UnitId(11)], -1);
}

#[test]
fn repeated_rounds_share_a_fingerprint() {
    let (step, aa_targets, dice) = landing();
    let first = step.run_round(aa_targets, &dice).unwrap();
    let second = step.run_round(aa_targets, &dice).unwrap();

    assert_eq!(first, second);
    assert_eq!(hex::encode(first.fingerprint()).len(), 64);
    assert_eq!(first.fingerprint(), second.fingerprint());

    let other = step.run_round(aa_targets, &[5, 5, 5, 5, 5, 5]).unwrap();
    assert_ne!(first.fingerprint(), other.fingerprint());
}

fn unit(id: u32, kind: &str, owner: PlayerId, attack: i32, defense: i32) -> Unit {
    Unit::new(UnitId(id), kind, owner, UnitStats::new(attack, defense))
}

fn players(axis_dominates: bool) -> OracleManager {
    OracleManager::from_players(
        PlayersSnapshot::new()
            .with_player(ALLIES, PlayerRules::default())
            .with_player(
                AXIS,
                PlayerRules {
                    dominating_first_round_attack: axis_dominates,
                    ..PlayerRules::default()
                },
            ),
    )
}

#[test]
fn evaluation_order_ignores_input_order() {
    let (step, _, _) = landing();
    let sorted = step.unit_values(Side::Offense, CombatType::Main).unwrap();

    let battle = ContentFactory::new(data_dir()).load_battle("landing").unwrap();
    let mut shuffled = battle.attackers.clone();
    shuffled.reverse();
    let reversed = CombatStep::builder()
        .oracles(OracleManager::from_players(battle.players.clone()))
        .rules(battle.rules.clone())
        .territory(battle.territory.clone())
        .attackers(shuffled)
        .defenders(battle.defenders.clone())
        .build()
        .unwrap()
        .unit_values(Side::Offense, CombatType::Main)
        .unwrap();

    assert_eq!(sorted, reversed);
}

#[test]
fn short_dice_sequence_is_an_internal_error() {
    let (step, aa_targets, _) = landing();
    let err = step.fire_aa(Side::Defense, aa_targets, &[0]).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Dice(DiceError::NotEnoughDice {
            required: 3,
            supplied: 1
        })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Internal);
}

#[test]
fn low_luck_pools_group_power() {
    let gun = unit(2, "aa_gun", AXIS, 0, 0).with_aa(AaStats::new(1, AaStats::INFINITE_ATTACKS));
    let step = CombatStep::builder()
        .config(BattleConfig::default().dice_mode(DiceMode::LowLuck))
        .oracles(players(false))
        .defenders(vec![gun])
        .build()
        .unwrap();

    let report = step.fire_aa(Side::Defense, 7, &[0, 4]).unwrap();
    assert_eq!(report.dice_consumed, 1);
    match &report.groups[0].outcome {
        AaOutcome::LowLuck(pools) => {
            assert_eq!(pools.len(), 1);
            assert_eq!(pools[0].dice_sides, 6);
            assert_eq!(pools[0].hits, 2);
            assert_eq!(pools[0].remainder, 1);
        }
        other => panic!("expected low luck outcome, got {other:?}"),
    }
}

#[test]
fn low_luck_measures_power_against_unit_die_size() {
    let mut aa = AaStats::new(8, 1);
    aa.defensive_die_sides = Some(12);
    let flak = unit(3, "flak_tower", AXIS, 0, 0).with_aa(aa);
    let step = CombatStep::builder()
        .config(BattleConfig::default().dice_mode(DiceMode::LowLuck))
        .oracles(players(false))
        .defenders(vec![flak])
        .build()
        .unwrap();

    let miss = step.fire_aa(Side::Defense, 1, &[11]).unwrap();
    assert_eq!(miss.hits(), 0);
    assert_eq!(miss.dice_consumed, 1);
    match &miss.groups[0].outcome {
        AaOutcome::LowLuck(pools) => {
            assert_eq!(pools[0].dice_sides, 12);
            assert_eq!(pools[0].remainder, 8);
        }
        other => panic!("expected low luck outcome, got {other:?}"),
    }

    let hit = step.fire_aa(Side::Defense, 1, &[7]).unwrap();
    assert_eq!(hit.hits(), 1);
}

#[test]
fn dominating_attacker_reduces_first_round_defense() {
    let defenders = vec![unit(1, "tank", ALLIES, 3, 3)];
    let attackers = vec![unit(2, "infantry", AXIS, 1, 2)];

    for (round, dominates, expected) in [(1, true, 1), (2, true, 3), (1, false, 3)] {
        let step = CombatStep::builder()
            .config(
                BattleConfig::default().first_round_defense(FirstRoundDefensePolicy::CapBase(1)),
            )
            .oracles(players(dominates))
            .attackers(attackers.clone())
            .defenders(defenders.clone())
            .round(round)
            .build()
            .unwrap();
        let values = step.unit_values(Side::Defense, CombatType::Main).unwrap();
        assert_eq!(strength_of(&values, 1), expected, "round {round}");
    }
}

#[test]
fn builder_rejects_invalid_input() {
    let missing = CombatStep::builder().build().unwrap_err();
    assert!(matches!(missing, RuntimeError::MissingOracles));

    let duplicate = CombatStep::builder()
        .oracles(players(false))
        .attackers(vec![unit(1, "infantry", ALLIES, 1, 2)])
        .defenders(vec![unit(1, "infantry", AXIS, 1, 2)])
        .build()
        .unwrap_err();
    assert!(matches!(duplicate, RuntimeError::DuplicateUnit(UnitId(1))));

    let config = CombatStep::builder()
        .config(BattleConfig::with_dice_sides(0))
        .oracles(players(false))
        .build()
        .unwrap_err();
    assert_eq!(config.severity(), ErrorSeverity::Validation);
}

#[test]
fn oracle_errors_keep_their_code() {
    let err = combat_core::OracleError::TechNotAvailable;
    assert!(err.error_code().starts_with("ORACLE_"));
}
