//! Property-based checks for the cost model, calculator and solver.

use proptest::prelude::*;

use ef_trainer::data::GameData;
use ef_trainer::optimizer::{solve_with_report, TargetStatus};
use ef_trainer::training::{
    compute_stat, compute_stats, marginal_cost, total_cost, Allocation, ModifierSelection,
    StatLine, TargetSet,
};

const CATEGORIES: [&str; 4] = ["Shooting", "Passing", "Dribbling", "Lower Body Strength"];
const TRAINABLE: [&str; 6] = ["Finishing", "Curl", "Low Pass", "Dribbling", "Speed", "Stamina"];

fn allocation_strategy() -> impl Strategy<Value = Allocation> {
    prop::array::uniform4(0..40i32).prop_map(|levels| {
        CATEGORIES
            .iter()
            .zip(levels)
            .map(|(name, level)| (name.to_string(), level))
            .collect()
    })
}

fn base_strategy() -> impl Strategy<Value = StatLine> {
    prop::array::uniform6(40..99i32).prop_map(|values| {
        TRAINABLE
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    })
}

fn selection_strategy() -> impl Strategy<Value = ModifierSelection> {
    (
        prop::sample::select(vec![0u32, 85, 86, 87, 88, 89]),
        prop::option::of(prop::sample::select(vec![
            "Total Package",
            "Technique",
            "Speed",
            "Shooting",
        ])),
        1..=5i32,
        prop::sample::subsequence(TRAINABLE.to_vec(), 0..=2),
    )
        .prop_map(|(tier, booster, level, boosts)| ModifierSelection {
            manager_tier: tier,
            primary_booster: booster.map(str::to_string),
            primary_level: level,
            manager_boosts: boosts.into_iter().map(str::to_string).collect(),
            crafted_booster: None,
        })
}

proptest! {
    #[test]
    fn raising_a_level_adds_its_marginal_cost(
        allocation in allocation_strategy(),
        index in 0..CATEGORIES.len(),
    ) {
        let category = CATEGORIES[index];
        let before = total_cost(&allocation);
        let mut raised = allocation.clone();
        let level = raised.entry(category.to_string()).or_insert(0);
        *level += 1;
        let new_level = *level;

        let after = total_cost(&raised);
        prop_assert!(after > before);
        prop_assert_eq!(after - before, marginal_cost(new_level));
    }

    #[test]
    fn first_tier_levels_cost_one_each(level in 0..=4i32) {
        let allocation: Allocation = [("Shooting".to_string(), level)].into_iter().collect();
        prop_assert_eq!(total_cost(&allocation), i64::from(level));
    }

    #[test]
    fn calculator_is_deterministic_and_keeps_the_key_set(
        base in base_strategy(),
        allocation in allocation_strategy(),
        selection in selection_strategy(),
    ) {
        let data = GameData::builtin();
        let first = compute_stats(&data, &base, &allocation, &selection);
        let second = compute_stats(&data, &base, &allocation, &selection);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.keys().eq(base.keys()));
    }

    #[test]
    fn solver_never_exceeds_budget(
        base in base_strategy(),
        selection in selection_strategy(),
        thresholds in prop::array::uniform6(40..110i32),
        budget in 0..80i64,
    ) {
        let data = GameData::builtin();
        let targets: TargetSet = TRAINABLE
            .iter()
            .zip(thresholds)
            .enumerate()
            .map(|(index, (stat, value))| ef_trainer::training::Target {
                stat: stat.to_string(),
                value,
                priority: index as u32 + 1,
            })
            .collect();

        let report = solve_with_report(&data, &base, &selection, &targets, budget);
        prop_assert!(total_cost(&report.allocation) <= budget);
        prop_assert_eq!(report.budget.used, total_cost(&report.allocation));
    }

    #[test]
    fn satisfied_single_target_is_minimal(
        base in base_strategy(),
        selection in selection_strategy(),
        stat_index in 0..TRAINABLE.len(),
        threshold in 40..110i32,
        budget in 0..80i64,
    ) {
        let data = GameData::builtin();
        let stat = TRAINABLE[stat_index];
        let mut targets = TargetSet::new();
        targets.insert(stat, threshold, 1);

        let report = solve_with_report(&data, &base, &selection, &targets, budget);
        if let TargetStatus::Satisfied { category, level } = &report.outcomes[0].status {
            let reached = compute_stat(&data, &base, &report.allocation, &selection, stat);
            prop_assert!(reached.is_some_and(|value| value >= threshold));
            if *level > 0 {
                let mut lowered = report.allocation.clone();
                lowered.insert(category.clone(), level - 1);
                let below = compute_stat(&data, &base, &lowered, &selection, stat);
                prop_assert!(below.is_some_and(|value| value < threshold));
            }
        } else {
            prop_assert!(report.allocation.values().all(|&level| level == 0));
        }
    }
}
