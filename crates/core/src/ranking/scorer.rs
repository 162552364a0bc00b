use std::cmp::Ordering;

use super::normalize::{normalize_column, Direction};
use super::weights::{resolve_weights, WeightSet};
use super::{NEUTRAL_SCORE, PERFORMANCE_RAM_SHARE, PERFORMANCE_STORAGE_SHARE};
use crate::domain::intent::{Category, IntentRecord};
use crate::domain::product::Product;
use crate::domain::result::RankedItem;

/// One candidate annotated with its composite score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCandidate {
    pub product: Product,
    /// Weighted sum of normalized criterion scores, in [0,1].
    pub score: f64,
    /// `score` rounded onto the [0,100] display scale.
    pub display_score: u8,
}

impl ScoredCandidate {
    /// Pair this candidate with its explanation text for the final result.
    pub fn into_ranked_item(self, explanation: String) -> RankedItem {
        RankedItem {
            id: self.product.id,
            title: self.product.title,
            score: self.display_score,
            explanation,
        }
    }
}

/// Scored and sorted candidate set for one query. The empty set is a
/// well-defined terminal case: no category, no weights, no candidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoredSet {
    pub category: Option<Category>,
    pub weights: Option<WeightSet>,
    pub candidates: Vec<ScoredCandidate>,
}

/// Score the filtered candidates against the intent's goals.
///
/// Per-criterion feature columns are normalized over the candidate set only,
/// combined with goal-derived weights into one [0,1] score per product, and
/// sorted descending. The sort is stable: exact ties keep catalog iteration
/// order.
pub fn score_candidates(intent: &IntentRecord, products: &[Product]) -> ScoredSet {
    if products.is_empty() {
        return ScoredSet::default();
    }

    // The filter guarantees a homogeneous category; read it off the first
    // row the way the result will report it.
    let category = Category::parse(&products[0].category).unwrap_or(Category::Laptop);
    let weights = resolve_weights(&intent.normalized_goals(), category);

    let price = normalize_column(&column(products, |p| p.price_usd), Direction::LowerIsBetter);
    let battery = normalize_column(&column(products, |p| p.battery_wh), Direction::HigherIsBetter);
    let screen =
        normalize_column(&column(products, |p| p.screen_inches), Direction::HigherIsBetter);
    let performance = performance_scores(products, category);

    let mut candidates: Vec<ScoredCandidate> = products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let score = weights.price * price[index]
                + weights.performance * performance[index]
                + weights.battery * battery[index]
                + weights.screen * screen[index];
            ScoredCandidate {
                product: product.clone(),
                score,
                display_score: display_score(score),
            }
        })
        .collect();

    // Stable descending sort; equal scores preserve input order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    ScoredSet { category: Some(category), weights: Some(weights), candidates }
}

/// Performance proxy. Portable devices blend RAM (dominant) with storage;
/// monitors carry no modeled performance signal and stay neutral.
fn performance_scores(products: &[Product], category: Category) -> Vec<f64> {
    match category {
        Category::Laptop | Category::Phone | Category::Tablet => {
            let ram = normalize_column(&column(products, |p| p.ram_gb), Direction::HigherIsBetter);
            let storage =
                normalize_column(&column(products, |p| p.storage_gb), Direction::HigherIsBetter);
            ram.iter()
                .zip(&storage)
                .map(|(r, s)| PERFORMANCE_RAM_SHARE * r + PERFORMANCE_STORAGE_SHARE * s)
                .collect()
        }
        Category::Monitor => vec![NEUTRAL_SCORE; products.len()],
    }
}

fn column(products: &[Product], attribute: fn(&Product) -> Option<f64>) -> Vec<Option<f64>> {
    products.iter().map(attribute).collect()
}

fn display_score(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Item {id}"),
            category: category.to_string(),
            ..Product::default()
        }
    }

    fn laptop(id: &str, price: f64, ram: f64, storage: f64, battery: f64) -> Product {
        Product {
            price_usd: Some(price),
            ram_gb: Some(ram),
            storage_gb: Some(storage),
            battery_wh: Some(battery),
            ..product(id, "laptop")
        }
    }

    fn intent_with_goals(tags: &[&str]) -> IntentRecord {
        IntentRecord {
            primary_goals: tags.iter().map(|tag| tag.to_string()).collect(),
            ..IntentRecord::default()
        }
    }

    #[test]
    fn empty_input_is_the_empty_terminal_case() {
        let set = score_candidates(&IntentRecord::default(), &[]);

        assert_eq!(set.category, None);
        assert_eq!(set.weights, None);
        assert!(set.candidates.is_empty());
    }

    #[test]
    fn scores_stay_in_unit_interval_and_display_in_0_to_100() {
        let products = vec![
            laptop("a", 600.0, 8.0, 256.0, 50.0),
            laptop("b", 900.0, 16.0, 512.0, 70.0),
            laptop("c", 1400.0, 32.0, 1024.0, 99.0),
        ];

        let set = score_candidates(&intent_with_goals(&["performance"]), &products);
        for candidate in &set.candidates {
            assert!((0.0..=1.0).contains(&candidate.score));
            assert!(candidate.display_score <= 100);
        }
    }

    #[test]
    fn ordering_is_non_increasing_in_score() {
        let products = vec![
            laptop("a", 600.0, 8.0, 256.0, 50.0),
            laptop("b", 900.0, 16.0, 512.0, 70.0),
            laptop("c", 1400.0, 32.0, 1024.0, 99.0),
            laptop("d", 750.0, 12.0, 256.0, 85.0),
        ];

        let set = score_candidates(&intent_with_goals(&["battery"]), &products);
        for pair in set.candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn exact_ties_preserve_catalog_order() {
        // Identical attributes produce identical scores.
        let products = vec![
            laptop("first", 800.0, 16.0, 512.0, 60.0),
            laptop("second", 800.0, 16.0, 512.0, 60.0),
            laptop("third", 800.0, 16.0, 512.0, 60.0),
        ];

        let set = score_candidates(&IntentRecord::default(), &products);
        let ids: Vec<&str> = set.candidates.iter().map(|c| c.product.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn more_ram_wins_under_performance_goal_at_equal_price() {
        let products =
            vec![laptop("small", 900.0, 8.0, 512.0, 60.0), laptop("big", 900.0, 32.0, 512.0, 60.0)];

        let set = score_candidates(&intent_with_goals(&["performance"]), &products);
        assert_eq!(set.candidates[0].product.id, "big");
    }

    #[test]
    fn monitor_performance_is_neutral_and_screen_dominates() {
        let mut small = product("small", "monitor");
        small.price_usd = Some(300.0);
        small.screen_inches = Some(24.0);
        let mut large = product("large", "monitor");
        large.price_usd = Some(300.0);
        large.screen_inches = Some(32.0);

        let set = score_candidates(&IntentRecord::default(), &[small, large]);
        assert_eq!(set.category, Some(Category::Monitor));
        assert_eq!(set.candidates[0].product.id, "large");
    }

    #[test]
    fn missing_attributes_do_not_break_scoring() {
        let mut bare = product("bare", "laptop");
        bare.price_usd = Some(500.0);
        let products = vec![bare, laptop("full", 700.0, 16.0, 512.0, 80.0)];

        let set = score_candidates(&intent_with_goals(&["battery"]), &products);
        assert_eq!(set.candidates.len(), 2);
        for candidate in &set.candidates {
            assert!((0.0..=1.0).contains(&candidate.score));
        }
    }

    #[test]
    fn unrecognized_category_string_scores_as_laptop() {
        let mut odd = product("odd", "widget");
        odd.price_usd = Some(100.0);

        let set = score_candidates(&IntentRecord::default(), &[odd]);
        assert_eq!(set.category, Some(Category::Laptop));
    }

    #[test]
    fn single_candidate_scores_all_neutral() {
        // Every column is constant for a single row, so the composite is the
        // weighted sum of neutral scores.
        let set =
            score_candidates(&IntentRecord::default(), &[laptop("only", 800.0, 16.0, 512.0, 60.0)]);

        assert!((set.candidates[0].score - 0.5).abs() < 1e-9);
        assert_eq!(set.candidates[0].display_score, 50);
    }
}
