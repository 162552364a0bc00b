use serde_json::Value;

use crate::catalog::Catalog;
use crate::domain::intent::{Category, IntentRecord};
use crate::domain::product::Product;

/// Accepted key synonyms for the budget cap, in lookup order.
const BUDGET_KEYS: &[&str] = &["budget_usd", "budget_max", "max_price", "budget", "price_cap"];

/// One minimum-threshold constraint: the synonym keys it may arrive under
/// and the product attribute it compares against.
struct MinConstraint {
    keys: &'static [&'static str],
    attribute: fn(&Product) -> Option<f64>,
}

const MIN_CONSTRAINTS: &[MinConstraint] = &[
    MinConstraint {
        keys: &["min_ram_gb", "ram_min", "ram_gb_min", "min_ram"],
        attribute: |product| product.ram_gb,
    },
    MinConstraint {
        keys: &["min_storage_gb", "storage_min", "min_storage"],
        attribute: |product| product.storage_gb,
    },
    MinConstraint {
        keys: &["min_battery_wh", "battery_min", "battery_wh_min"],
        attribute: |product| product.battery_wh,
    },
];

/// Resolve the device category for a query.
///
/// Precedence: an explicit recognized category field in the intent record,
/// then the `device_type`/`product_type` synonym keys, then keyword matching
/// against the raw query text, then the laptop default. Never fails.
pub fn resolve_category(intent: &IntentRecord, query: &str) -> Category {
    if let Some(value) = &intent.category {
        if let Some(category) = Category::parse(value) {
            return category;
        }
    }
    for key in ["device_type", "product_type"] {
        if let Some(Value::String(value)) = intent.extra.get(key) {
            if let Some(category) = Category::parse(value) {
                return category;
            }
        }
    }

    let query = query.to_lowercase();
    for category in Category::ALL {
        if category.keywords().iter().any(|keyword| query.contains(keyword)) {
            return category;
        }
    }

    Category::Laptop
}

/// Narrow the catalog to candidates for this query.
///
/// Category match is mandatory; numeric filters (budget cap and minimum
/// thresholds) are advisory. If applying every numeric filter empties the
/// set, the full category-matching set is returned instead, so an
/// over-constrained query still produces candidates. Missing attribute
/// values compare as 0 against minimum thresholds.
pub fn filter_products(catalog: &Catalog, intent: &IntentRecord, query: &str) -> Vec<Product> {
    let category = resolve_category(intent, query);
    let in_category = catalog.in_category(category);

    let mut candidates: Vec<Product> = in_category.clone();

    if let Some(budget) = budget_cap(intent) {
        candidates.retain(|product| product.price_usd.unwrap_or(0.0) <= budget);
    }

    for constraint in MIN_CONSTRAINTS {
        if let Some(threshold) = numeric_field(intent, constraint.keys) {
            candidates
                .retain(|product| (constraint.attribute)(product).unwrap_or(0.0) >= threshold);
        }
    }

    if candidates.is_empty() {
        return in_category;
    }
    candidates
}

/// Effective budget cap. The typed `budget_usd` field wins; otherwise the
/// synonym keys are probed. Negative values from an untrusted extractor are
/// treated as absent rather than filtering everything out.
fn budget_cap(intent: &IntentRecord) -> Option<f64> {
    intent
        .budget_usd
        .or_else(|| numeric_field(intent, BUDGET_KEYS))
        .filter(|budget| *budget >= 0.0)
}

/// Look up the first usable numeric value under any of `keys`, checking the
/// hard-constraint map before stray top-level keys.
fn numeric_field(intent: &IntentRecord, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        intent
            .hard_constraints
            .get(*key)
            .or_else(|| intent.extra.get(*key))
            .and_then(parse_numeric)
    })
}

/// Parse a number out of a JSON value that may be a number or a string
/// carrying currency symbols, thousands separators, or a unit suffix.
/// Unusable values are `None`, never an error.
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(raw) => parse_numeric_str(raw),
        _ => None,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();
    if let Ok(parsed) = cleaned.parse::<f64>() {
        return Some(parsed).filter(|v| v.is_finite());
    }

    // Tolerate trailing units like "900 dollars" by parsing the numeric prefix.
    let prefix: String =
        cleaned.chars().take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::Catalog;

    fn laptop(id: &str, price: f64, ram: f64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Laptop {id}"),
            category: "laptop".to_string(),
            price_usd: Some(price),
            ram_gb: Some(ram),
            ..Product::default()
        }
    }

    fn intent_json(raw: serde_json::Value) -> IntentRecord {
        serde_json::from_value(raw).expect("valid intent")
    }

    #[test]
    fn category_prefers_explicit_intent_field() {
        let intent = intent_json(json!({"category": "Tablet"}));

        assert_eq!(resolve_category(&intent, "need a big monitor"), Category::Tablet);
    }

    #[test]
    fn category_falls_back_to_query_keywords_then_laptop() {
        let intent = intent_json(json!({"category": "gizmo"}));

        assert_eq!(resolve_category(&intent, "a phone for my commute"), Category::Phone);
        assert_eq!(resolve_category(&intent, "something nice"), Category::Laptop);
    }

    #[test]
    fn category_accepts_device_type_synonym_key() {
        let intent = intent_json(json!({"device_type": "monitor"}));

        assert_eq!(resolve_category(&intent, ""), Category::Monitor);
    }

    #[test]
    fn budget_and_min_ram_narrow_the_candidate_set() {
        let catalog = Catalog::new(vec![laptop("a", 850.0, 16.0), laptop("b", 950.0, 32.0)]);
        let intent = intent_json(json!({
            "category": "laptop",
            "budget_usd": 900,
            "hard_constraints": {"min_ram_gb": 16}
        }));

        let filtered = filter_products(&catalog, &intent, "laptop under 900");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn budget_synonym_keys_are_probed_in_order() {
        let catalog = Catalog::new(vec![laptop("a", 850.0, 16.0), laptop("b", 950.0, 32.0)]);
        let intent = intent_json(json!({"category": "laptop", "max_price": "$900"}));

        let filtered = filter_products(&catalog, &intent, "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn missing_attribute_compares_as_zero_for_thresholds() {
        let mut no_ram = laptop("a", 700.0, 0.0);
        no_ram.ram_gb = None;
        let catalog = Catalog::new(vec![no_ram, laptop("b", 800.0, 16.0)]);
        let intent = intent_json(json!({
            "category": "laptop",
            "hard_constraints": {"min_ram": 8}
        }));

        let filtered = filter_products(&catalog, &intent, "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b");
    }

    #[test]
    fn over_constrained_filters_relax_to_category_only() {
        let catalog = Catalog::new(vec![laptop("a", 850.0, 16.0), laptop("b", 950.0, 32.0)]);
        let intent = intent_json(json!({"category": "laptop", "budget_usd": 100}));

        let filtered = filter_products(&catalog, &intent, "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn category_match_is_always_enforced() {
        let catalog = Catalog::new(vec![laptop("a", 850.0, 16.0)]);
        let intent = intent_json(json!({"category": "phone"}));

        assert!(filter_products(&catalog, &intent, "").is_empty());
    }

    #[test]
    fn negative_budget_is_ignored() {
        let catalog = Catalog::new(vec![laptop("a", 850.0, 16.0)]);
        let intent = intent_json(json!({"category": "laptop", "budget_usd": -50}));

        assert_eq!(filter_products(&catalog, &intent, "").len(), 1);
    }

    #[test]
    fn parse_numeric_handles_currency_strings_and_units() {
        assert_eq!(parse_numeric(&json!("$1,299.99")), Some(1299.99));
        assert_eq!(parse_numeric(&json!("900 dollars")), Some(900.0));
        assert_eq!(parse_numeric(&json!(16)), Some(16.0));
        assert_eq!(parse_numeric(&json!("no idea")), None);
        assert_eq!(parse_numeric(&json!(true)), None);
    }
}
