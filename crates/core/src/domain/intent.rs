use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Device category a query resolves to. Every query resolves to exactly one
/// category before filtering; unresolved queries default to `Laptop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Laptop,
    Phone,
    Tablet,
    Monitor,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::Laptop, Category::Phone, Category::Tablet, Category::Monitor];

    /// Query-text keywords that map to this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Laptop => &["laptop", "notebook", "ultrabook"],
            Self::Phone => &["phone", "smartphone", "mobile"],
            Self::Tablet => &["tablet", "ipad", "tab"],
            Self::Monitor => &["monitor", "screen", "display"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Phone => "phone",
            Self::Tablet => "tablet",
            Self::Monitor => "monitor",
        }
    }

    /// Parse a category label as emitted by the intent extractor. Matching is
    /// lenient on case and surrounding whitespace; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "laptop" => Some(Self::Laptop),
            "phone" => Some(Self::Phone),
            "tablet" => Some(Self::Tablet),
            "monitor" => Some(Self::Monitor),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured representation of what the user asked for, as produced by the
/// intent extraction collaborator. Read-only downstream of extraction.
///
/// The extractor output is untrusted: fields may be missing, mistyped, or
/// spelled with synonym keys. Unrecognized top-level keys are captured in
/// `extra` so constraint lookup can probe them explicitly instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub budget_usd: Option<f64>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub primary_goals: Vec<String>,
    #[serde(default)]
    pub hard_constraints: BTreeMap<String, Value>,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IntentRecord {
    /// Minimally-populated record used when intent extraction fails or
    /// returns malformed data. The raw query is preserved in `notes`.
    pub fn fallback(query: &str) -> Self {
        Self {
            category: Some(Category::Laptop.as_str().to_string()),
            budget_usd: None,
            primary_goals: Vec::new(),
            hard_constraints: BTreeMap::new(),
            notes: query.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Goals lowercased for case-insensitive rule matching.
    pub fn normalized_goals(&self) -> Vec<String> {
        self.primary_goals.iter().map(|goal| goal.trim().to_lowercase()).collect()
    }
}

/// Accepts a JSON number, a numeric string (currency symbols tolerated), or
/// null. Anything unusable deserializes to `None` rather than erroring.
fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(crate::ranking::filter::parse_numeric))
}

/// Accepts either a single string or a sequence of strings for goals.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(goal)) => vec![goal],
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(goal) => Some(goal),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_and_whitespace_tolerant() {
        assert_eq!(Category::parse("  Monitor "), Some(Category::Monitor));
        assert_eq!(Category::parse("LAPTOP"), Some(Category::Laptop));
        assert_eq!(Category::parse("toaster"), None);
    }

    #[test]
    fn fallback_record_defaults_to_laptop_and_keeps_query() {
        let intent = IntentRecord::fallback("cheap tablet for travel");

        assert_eq!(intent.category.as_deref(), Some("laptop"));
        assert_eq!(intent.budget_usd, None);
        assert!(intent.primary_goals.is_empty());
        assert!(intent.hard_constraints.is_empty());
        assert_eq!(intent.notes, "cheap tablet for travel");
    }

    #[test]
    fn deserializes_goals_from_single_string() {
        let intent: IntentRecord =
            serde_json::from_str(r#"{"primary_goals": "battery_life"}"#).expect("valid intent");

        assert_eq!(intent.primary_goals, vec!["battery_life".to_string()]);
    }

    #[test]
    fn deserializes_budget_from_currency_string() {
        let intent: IntentRecord =
            serde_json::from_str(r#"{"budget_usd": "$1,200"}"#).expect("valid intent");

        assert_eq!(intent.budget_usd, Some(1200.0));
    }

    #[test]
    fn unknown_keys_land_in_extra() {
        let intent: IntentRecord =
            serde_json::from_str(r#"{"max_price": 900, "notes": "n"}"#).expect("valid intent");

        assert_eq!(intent.extra.get("max_price"), Some(&serde_json::json!(900)));
    }
}
