//! Round-scoped support availability and consumption.
//!
//! A [`SupportLedger`] is built once per combat step from the units present and
//! the rule set. Its pools are decremented in place as support is granted, so
//! the order in which targets are queried decides who receives support. Callers
//! must query targets in a stable order; see `combat-runtime` for the ordering
//! used there.

use std::collections::BTreeMap;

use super::rule::{Dimension, Faction, StackCap, SupportRule};
use crate::env::TechOracle;
use crate::state::{Side, Unit, UnitId};

/// Audit record: supplier → (recipient → total bonus granted).
pub type SupportGiven = BTreeMap<UnitId, BTreeMap<UnitId, i32>>;

/// Support granted to one target by a single `give_support_to_unit` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportGrant {
    by_supplier: BTreeMap<UnitId, i32>,
    instances: u32,
}

impl SupportGrant {
    fn record(&mut self, supplier: UnitId, bonus: i32) {
        let total = self.by_supplier.entry(supplier).or_insert(0);
        *total = total.saturating_add(bonus);
        self.instances += 1;
    }

    /// Total bonus across all suppliers.
    pub fn sum(&self) -> i32 {
        self.by_supplier
            .values()
            .fold(0i32, |total, amount| total.saturating_add(*amount))
    }

    /// Number of support instances consumed.
    pub fn instances(&self) -> u32 {
        self.instances
    }

    pub fn from_supplier(&self, supplier: UnitId) -> i32 {
        self.by_supplier.get(&supplier).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.instances == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, i32)> + '_ {
        self.by_supplier.iter().map(|(unit, amount)| (*unit, *amount))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SupplierPool {
    unit: UnitId,
    remaining: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RulePool {
    rule: SupportRule,
    suppliers: Vec<SupplierPool>,
}

impl RulePool {
    fn available(&self) -> u32 {
        self.suppliers
            .iter()
            .fold(0u32, |total, supplier| total.saturating_add(supplier.remaining))
    }
}

/// Rules sharing a bonus type, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
struct BonusGroup {
    key: String,
    stack_cap: StackCap,
    rules: Vec<RulePool>,
}

/// Available support for one side and faction during a combat step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupportLedger {
    groups: Vec<BonusGroup>,
    given: SupportGiven,
}

impl SupportLedger {
    /// Computes available support from `units` for rules matching `side` and `faction`.
    ///
    /// A rule is kept only when at least one present unit is owned by one of its
    /// players and at least one present unit of its supplier type (owned by such
    /// a player) can produce it. Each producer contributes `instances_per_unit`,
    /// doubled when the rule is tech-gated and the producer's owner has the
    /// technology.
    pub fn new(
        units: &[Unit],
        rules: &[SupportRule],
        side: Side,
        faction: Faction,
        tech: &(impl TechOracle + ?Sized),
    ) -> Self {
        let mut ledger = Self::default();

        for rule in rules {
            if rule.side != side || rule.faction != faction {
                continue;
            }
            if !units.iter().any(|unit| rule.includes_player(unit.owner)) {
                continue;
            }

            let suppliers: Vec<SupplierPool> = units
                .iter()
                .filter(|unit| unit.kind == rule.supplier_type && rule.includes_player(unit.owner))
                .map(|unit| {
                    let doubled = rule.requires_tech && tech.has_improved_support(unit.owner);
                    let remaining = if doubled {
                        rule.instances_per_unit.saturating_mul(2)
                    } else {
                        rule.instances_per_unit
                    };
                    SupplierPool {
                        unit: unit.id,
                        remaining,
                    }
                })
                .filter(|supplier| supplier.remaining > 0)
                .collect();

            if suppliers.is_empty() {
                continue;
            }

            ledger.register(RulePool {
                rule: rule.clone(),
                suppliers,
            });
        }

        tracing::trace!(
            %side,
            %faction,
            rules = ledger.rule_count(),
            "support ledger built"
        );

        ledger
    }

    fn register(&mut self, pool: RulePool) {
        let key = &pool.rule.bonus_type.key;
        match self.groups.iter_mut().find(|group| &group.key == key) {
            Some(group) => group.rules.push(pool),
            None => self.groups.push(BonusGroup {
                key: key.clone(),
                stack_cap: pool.rule.bonus_type.stack_cap,
                rules: vec![pool],
            }),
        }
    }

    /// Grants support of `dimension` to `target`, consuming pool instances.
    ///
    /// Within each bonus type the target receives at most the group's stack cap
    /// of instances, drawn from rules and suppliers in registration order. Pools
    /// are shared by all targets; the stacking count restarts on every call.
    pub fn give_support_to_unit(&mut self, target: &Unit, dimension: Dimension) -> SupportGrant {
        let mut grant = SupportGrant::default();

        for group in &mut self.groups {
            let stack_cap = group.stack_cap;
            let mut granted = 0u32;

            'rules: for pool in group
                .rules
                .iter_mut()
                .filter(|pool| pool.rule.dimension == dimension && pool.rule.applies_to(&target.kind))
            {
                for supplier in &mut pool.suppliers {
                    while supplier.remaining > 0 {
                        if !stack_cap.allows(granted) {
                            break 'rules;
                        }
                        supplier.remaining -= 1;
                        granted += 1;
                        grant.record(supplier.unit, pool.rule.bonus);

                        tracing::trace!(
                            target_unit = %target.id,
                            supplier = %supplier.unit,
                            rule = %pool.rule.id,
                            bonus = pool.rule.bonus,
                            "support instance granted"
                        );
                    }
                }
            }
        }

        for (supplier, amount) in grant.iter() {
            let total = self
                .given
                .entry(supplier)
                .or_default()
                .entry(target.id)
                .or_insert(0);
            *total = total.saturating_add(amount);
        }

        grant
    }

    /// Returns a ledger holding only rules of `dimension`, with pools copied
    /// from the current state and an empty audit record.
    pub fn filter(&self, dimension: Dimension) -> Self {
        let groups = self
            .groups
            .iter()
            .filter_map(|group| {
                let rules: Vec<RulePool> = group
                    .rules
                    .iter()
                    .filter(|pool| pool.rule.dimension == dimension)
                    .cloned()
                    .collect();
                (!rules.is_empty()).then(|| BonusGroup {
                    key: group.key.clone(),
                    stack_cap: group.stack_cap,
                    rules,
                })
            })
            .collect();

        Self {
            groups,
            given: SupportGiven::new(),
        }
    }

    /// Remaining instances of the rule with `rule_id` (0 if the rule was dropped).
    pub fn available(&self, rule_id: &str) -> u32 {
        self.pools()
            .filter(|pool| pool.rule.id == rule_id)
            .map(RulePool::available)
            .fold(0u32, u32::saturating_add)
    }

    /// Remaining instances `supplier` can still grant across all rules.
    pub fn remaining_for(&self, supplier: UnitId) -> u32 {
        self.pools()
            .flat_map(|pool| pool.suppliers.iter())
            .filter(|pool| pool.unit == supplier)
            .map(|pool| pool.remaining)
            .fold(0u32, u32::saturating_add)
    }

    pub fn support_given(&self) -> &SupportGiven {
        &self.given
    }

    /// Total bonus recorded for `target` across all suppliers.
    pub fn total_given_to(&self, target: UnitId) -> i32 {
        self.given
            .values()
            .filter_map(|recipients| recipients.get(&target))
            .fold(0i32, |total, amount| total.saturating_add(*amount))
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.pools().map(|pool| pool.rule.id.as_str())
    }

    pub fn rule_count(&self) -> usize {
        self.pools().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn pools(&self) -> impl Iterator<Item = &RulePool> {
        self.groups.iter().flat_map(|group| group.rules.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::support::BonusType;
    use crate::env::{PlayerRules, PlayersSnapshot};
    use crate::state::{PlayerId, UnitStats};

    const RED: PlayerId = PlayerId(1);
    const BLUE: PlayerId = PlayerId(2);

    fn unit(id: u32, kind: &str, owner: PlayerId) -> Unit {
        Unit::new(UnitId(id), kind, owner, UnitStats::new(1, 2))
    }

    fn artillery_rule(id: &str) -> SupportRule {
        SupportRule::new(
            id,
            "artillery",
            Side::Offense,
            Faction::Allied,
            Dimension::Strength,
            1,
        )
        .targets(["infantry"])
        .players([RED])
    }

    fn no_tech() -> PlayersSnapshot {
        PlayersSnapshot::new()
    }

    #[test]
    fn shared_bonus_type_grants_first_registered_rule_only() {
        let shared = BonusType::new("artillery", StackCap::Limited(1));
        let rules = vec![
            artillery_rule("first").bonus_type(shared.clone()),
            artillery_rule("second").bonus_type(shared),
        ];
        let units = vec![
            unit(1, "artillery", RED),
            unit(2, "infantry", RED),
            unit(3, "infantry", RED),
        ];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        let grant = ledger.give_support_to_unit(&units[1], Dimension::Strength);
        assert_eq!(grant.sum(), 1);
        assert_eq!(grant.instances(), 1);
        assert_eq!(ledger.available("first"), 0);
        assert_eq!(ledger.available("second"), 1);

        let grant = ledger.give_support_to_unit(&units[2], Dimension::Strength);
        assert_eq!(grant.sum(), 1);
        assert_eq!(ledger.available("second"), 0);
    }

    #[test]
    fn pool_is_global_across_targets() {
        let rules = vec![artillery_rule("art")];
        let units = vec![
            unit(1, "artillery", RED),
            unit(2, "infantry", RED),
            unit(3, "infantry", RED),
        ];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        assert_eq!(ledger.give_support_to_unit(&units[1], Dimension::Strength).sum(), 1);
        assert!(ledger.give_support_to_unit(&units[2], Dimension::Strength).is_empty());
    }

    #[test]
    fn stack_cap_counts_across_suppliers() {
        let rules = vec![artillery_rule("art").bonus_type(BonusType::new("art", StackCap::Limited(2)))];
        let units = vec![
            unit(1, "artillery", RED),
            unit(2, "artillery", RED),
            unit(3, "artillery", RED),
            unit(4, "infantry", RED),
        ];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        let grant = ledger.give_support_to_unit(&units[3], Dimension::Strength);
        assert_eq!(grant.sum(), 2);
        assert_eq!(grant.from_supplier(UnitId(1)), 1);
        assert_eq!(grant.from_supplier(UnitId(2)), 1);
        assert_eq!(grant.from_supplier(UnitId(3)), 0);
        assert_eq!(ledger.available("art"), 1);
    }

    #[test]
    fn unlimited_cap_drains_pool() {
        let rules = vec![
            artillery_rule("art")
                .instances_per_unit(3)
                .bonus_type(BonusType::new("art", StackCap::Unlimited)),
        ];
        let units = vec![unit(1, "artillery", RED), unit(2, "infantry", RED)];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        assert_eq!(ledger.give_support_to_unit(&units[1], Dimension::Strength).sum(), 3);
        assert_eq!(ledger.available("art"), 0);
    }

    #[test]
    fn tech_doubles_per_supplier() {
        let rules = vec![artillery_rule("art").players([RED, BLUE]).requires_tech(true)];
        let units = vec![
            unit(1, "artillery", RED),
            unit(2, "artillery", BLUE),
            unit(3, "infantry", RED),
        ];
        let tech = PlayersSnapshot::new().with_player(
            RED,
            PlayerRules {
                improved_support: true,
                ..PlayerRules::default()
            },
        );
        let ledger = SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &tech);

        assert_eq!(ledger.remaining_for(UnitId(1)), 2);
        assert_eq!(ledger.remaining_for(UnitId(2)), 1);
        assert_eq!(ledger.available("art"), 3);
    }

    #[test]
    fn tech_doubling_saturates() {
        let rules = vec![
            artillery_rule("art")
                .instances_per_unit(u32::MAX)
                .requires_tech(true),
        ];
        let units = vec![unit(1, "artillery", RED)];
        let tech = PlayersSnapshot::new().with_player(
            RED,
            PlayerRules {
                improved_support: true,
                ..PlayerRules::default()
            },
        );
        let ledger = SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &tech);
        assert_eq!(ledger.remaining_for(UnitId(1)), u32::MAX);
    }

    #[test]
    fn rules_filtered_by_side_and_faction() {
        let rules = vec![
            artillery_rule("offense"),
            SupportRule::new(
                "defense",
                "artillery",
                Side::Defense,
                Faction::Allied,
                Dimension::Strength,
                1,
            )
            .targets(["infantry"])
            .players([RED]),
            SupportRule::new(
                "hinder",
                "artillery",
                Side::Offense,
                Faction::Enemy,
                Dimension::Strength,
                -1,
            )
            .targets(["infantry"])
            .players([RED]),
        ];
        let units = vec![unit(1, "artillery", RED)];

        let ledger = SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());
        assert_eq!(ledger.rule_ids().collect::<Vec<_>>(), vec!["offense"]);

        let ledger = SupportLedger::new(&units, &rules, Side::Offense, Faction::Enemy, &no_tech());
        assert_eq!(ledger.rule_ids().collect::<Vec<_>>(), vec!["hinder"]);
    }

    #[test]
    fn rules_without_producers_or_players_are_dropped() {
        let rules = vec![artillery_rule("art")];

        let no_artillery = vec![unit(2, "infantry", RED)];
        let ledger =
            SupportLedger::new(&no_artillery, &rules, Side::Offense, Faction::Allied, &no_tech());
        assert!(ledger.is_empty());

        let wrong_owner = vec![unit(1, "artillery", BLUE), unit(2, "infantry", BLUE)];
        let ledger =
            SupportLedger::new(&wrong_owner, &rules, Side::Offense, Faction::Allied, &no_tech());
        assert!(ledger.is_empty());
        assert_eq!(ledger.available("art"), 0);
    }

    #[test]
    fn only_eligible_target_types_receive() {
        let rules = vec![artillery_rule("art")];
        let units = vec![unit(1, "artillery", RED), unit(2, "armour", RED)];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        assert!(ledger.give_support_to_unit(&units[1], Dimension::Strength).is_empty());
        assert_eq!(ledger.available("art"), 1);
    }

    #[test]
    fn dimension_selects_rules() {
        let rules = vec![artillery_rule("art")];
        let units = vec![unit(1, "artillery", RED), unit(2, "infantry", RED)];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        assert!(ledger.give_support_to_unit(&units[1], Dimension::Roll).is_empty());
        assert_eq!(ledger.give_support_to_unit(&units[1], Dimension::Strength).sum(), 1);
    }

    #[test]
    fn filter_copies_pools_independently() {
        let rules = vec![
            artillery_rule("strength"),
            SupportRule::new(
                "roll",
                "artillery",
                Side::Offense,
                Faction::Allied,
                Dimension::Roll,
                1,
            )
            .targets(["infantry"])
            .players([RED]),
        ];
        let units = vec![unit(1, "artillery", RED), unit(2, "infantry", RED)];
        let combined =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());

        let mut strength = combined.filter(Dimension::Strength);
        let roll = combined.filter(Dimension::Roll);
        assert_eq!(strength.rule_ids().collect::<Vec<_>>(), vec!["strength"]);
        assert_eq!(roll.rule_ids().collect::<Vec<_>>(), vec!["roll"]);

        strength.give_support_to_unit(&units[1], Dimension::Strength);
        assert_eq!(strength.available("strength"), 0);
        assert_eq!(combined.available("strength"), 1);
        assert_eq!(roll.available("roll"), 1);
    }

    #[test]
    fn support_given_records_supplier_and_recipient() {
        let rules = vec![artillery_rule("art").instances_per_unit(2)];
        let units = vec![
            unit(1, "artillery", RED),
            unit(2, "infantry", RED),
            unit(3, "infantry", RED),
        ];
        let mut ledger =
            SupportLedger::new(&units, &rules, Side::Offense, Faction::Allied, &no_tech());
        ledger.give_support_to_unit(&units[1], Dimension::Strength);
        ledger.give_support_to_unit(&units[2], Dimension::Strength);

        let given = ledger.support_given();
        assert_eq!(given[&UnitId(1)][&UnitId(2)], 1);
        assert_eq!(given[&UnitId(1)][&UnitId(3)], 1);
        assert_eq!(ledger.total_given_to(UnitId(3)), 1);
        assert_eq!(ledger.total_given_to(UnitId(1)), 0);
    }

    #[test]
    fn instances_per_target_never_exceed_stack_cap() {
        for cap in 0..4u32 {
            for suppliers in 0..5u32 {
                for per_unit in 1..3u32 {
                    let shared = BonusType::new("shared", StackCap::Limited(cap));
                    let rules = vec![
                        artillery_rule("a").instances_per_unit(per_unit).bonus_type(shared.clone()),
                        artillery_rule("b").bonus_type(shared),
                    ];
                    let mut units: Vec<Unit> = (0..suppliers)
                        .map(|i| unit(100 + i, "artillery", RED))
                        .collect();
                    let targets: Vec<Unit> = (0..4).map(|i| unit(i, "infantry", RED)).collect();
                    units.extend(targets.iter().cloned());

                    let mut ledger = SupportLedger::new(
                        &units,
                        &rules,
                        Side::Offense,
                        Faction::Allied,
                        &no_tech(),
                    );
                    let total_before = ledger.available("a") + ledger.available("b");
                    let mut consumed = 0;
                    for target in &targets {
                        let grant = ledger.give_support_to_unit(target, Dimension::Strength);
                        assert!(grant.instances() <= cap);
                        consumed += grant.instances();
                    }
                    assert_eq!(total_before - consumed, ledger.available("a") + ledger.available("b"));
                }
            }
        }
    }
}
