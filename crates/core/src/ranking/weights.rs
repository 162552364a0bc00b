use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GOAL_BUMP;
use crate::domain::intent::Category;

/// Scoring criteria. Every weight set carries all four, even when a
/// category zeroes one out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Price,
    Performance,
    Battery,
    Screen,
}

impl Criterion {
    pub const ALL: [Criterion; 4] =
        [Criterion::Price, Criterion::Performance, Criterion::Battery, Criterion::Screen];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Performance => "performance",
            Self::Battery => "battery",
            Self::Screen => "screen",
        }
    }
}

/// One goal-to-criterion bump rule. A goal tag matches when any keyword is a
/// case-insensitive substring of it; a match adds [`GOAL_BUMP`] to the
/// criterion's weight. One goal may match several rules.
struct GoalRule {
    keywords: &'static [&'static str],
    criterion: Criterion,
}

const GOAL_RULES: &[GoalRule] = &[
    GoalRule { keywords: &["performance", "speed", "gaming"], criterion: Criterion::Performance },
    GoalRule { keywords: &["battery", "long life", "all day"], criterion: Criterion::Battery },
    GoalRule { keywords: &["budget", "cheap", "affordable", "price"], criterion: Criterion::Price },
    GoalRule { keywords: &["screen", "display", "bigger"], criterion: Criterion::Screen },
];

/// Per-criterion weights. Invariant after [`resolve_weights`]: non-negative
/// and summing to 1.0 within floating-point tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub price: f64,
    pub performance: f64,
    pub battery: f64,
    pub screen: f64,
}

impl WeightSet {
    /// Category base weights before any goal bumps. Portable devices weight
    /// performance and battery; monitors shift onto screen and price.
    pub fn base_for(category: Category) -> Self {
        match category {
            Category::Laptop | Category::Phone | Category::Tablet => {
                Self { price: 0.30, performance: 0.40, battery: 0.30, screen: 0.00 }
            }
            Category::Monitor => {
                Self { price: 0.40, performance: 0.10, battery: 0.00, screen: 0.50 }
            }
        }
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Price => self.price,
            Criterion::Performance => self.performance,
            Criterion::Battery => self.battery,
            Criterion::Screen => self.screen,
        }
    }

    fn bump(&mut self, criterion: Criterion, delta: f64) {
        match criterion {
            Criterion::Price => self.price += delta,
            Criterion::Performance => self.performance += delta,
            Criterion::Battery => self.battery += delta,
            Criterion::Screen => self.screen += delta,
        }
    }

    pub fn sum(&self) -> f64 {
        self.price + self.performance + self.battery + self.screen
    }

    /// Rescale so weights sum to exactly 1.0. A non-positive total cannot
    /// occur with positive bases and additive bumps, but is handled with an
    /// equal split rather than trusted away.
    fn renormalized(self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            let share = 1.0 / Criterion::ALL.len() as f64;
            return Self { price: share, performance: share, battery: share, screen: share };
        }
        Self {
            price: self.price / total,
            performance: self.performance / total,
            battery: self.battery / total,
            screen: self.screen / total,
        }
    }

    pub fn to_map(self) -> BTreeMap<String, f64> {
        Criterion::ALL
            .into_iter()
            .map(|criterion| (criterion.as_str().to_string(), self.get(criterion)))
            .collect()
    }
}

/// Derive the weight set for a category and the user's stated goals.
///
/// Each goal is matched against the rule table; every match adds the fixed
/// increment to its criterion. Bumps accumulate additively and uncapped
/// (stating "battery" and "long life" in one query bumps battery twice),
/// then the set is renormalized to sum 1.0. Deterministic and total.
pub fn resolve_weights(goals: &[String], category: Category) -> WeightSet {
    let mut weights = WeightSet::base_for(category);

    for goal in goals {
        let goal = goal.to_lowercase();
        for rule in GOAL_RULES {
            if rule.keywords.iter().any(|keyword| goal.contains(keyword)) {
                weights.bump(rule.criterion, GOAL_BUMP);
            }
        }
    }

    weights.renormalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    fn assert_sums_to_one(weights: WeightSet) {
        assert!((weights.sum() - 1.0).abs() < 1e-9, "weights sum to {}", weights.sum());
    }

    #[test]
    fn base_weights_without_goals_are_already_normalized() {
        let weights = resolve_weights(&[], Category::Laptop);

        assert_eq!(weights.price, 0.30);
        assert_eq!(weights.performance, 0.40);
        assert_eq!(weights.battery, 0.30);
        assert_eq!(weights.screen, 0.00);
        assert_sums_to_one(weights);
    }

    #[test]
    fn monitor_base_weights_shift_onto_screen() {
        let weights = resolve_weights(&[], Category::Monitor);

        assert_eq!(weights.screen, 0.50);
        assert_eq!(weights.battery, 0.00);
        assert_sums_to_one(weights);
    }

    #[test]
    fn battery_goal_raises_battery_relative_to_performance() {
        let base = WeightSet::base_for(Category::Laptop);
        let weights = resolve_weights(&goals(&["battery_life"]), Category::Laptop);

        // Battery was bumped before renormalization; performance was not, so
        // battery gains share at performance's expense.
        assert!(weights.battery > base.battery);
        assert!(weights.battery / weights.performance > base.battery / base.performance);
        assert_sums_to_one(weights);
    }

    #[test]
    fn goal_matching_is_case_insensitive_substring() {
        let weights = resolve_weights(&goals(&["GAMING rig"]), Category::Laptop);

        // 0.40 + 0.15 bump, renormalized over 1.15: performance gains share.
        assert!(weights.performance > WeightSet::base_for(Category::Laptop).performance);
        assert!(weights.performance > weights.price);
        assert_sums_to_one(weights);
    }

    #[test]
    fn synonym_goals_double_bump() {
        let single = resolve_weights(&goals(&["battery"]), Category::Laptop);
        let double = resolve_weights(&goals(&["battery", "all day use"]), Category::Laptop);

        assert!(double.battery > single.battery);
        assert_sums_to_one(double);
    }

    #[test]
    fn one_goal_may_trigger_multiple_criteria() {
        // "cheap big screen" matches both the price and screen rules.
        let weights = resolve_weights(&goals(&["cheap big screen"]), Category::Laptop);
        let base = WeightSet::base_for(Category::Laptop);

        assert!(weights.screen > base.screen);
        assert!(weights.price / weights.performance > base.price / base.performance);
        assert_sums_to_one(weights);
    }

    #[test]
    fn weights_are_non_negative_for_arbitrary_goals() {
        let weights =
            resolve_weights(&goals(&["battery", "gaming", "cheap", "display", "misc"]), Category::Phone);

        for criterion in Criterion::ALL {
            assert!(weights.get(criterion) >= 0.0);
        }
        assert_sums_to_one(weights);
    }

    #[test]
    fn non_positive_total_falls_back_to_equal_split() {
        let degenerate =
            WeightSet { price: 0.0, performance: 0.0, battery: 0.0, screen: 0.0 }.renormalized();

        for criterion in Criterion::ALL {
            assert_eq!(degenerate.get(criterion), 0.25);
        }
    }
}
