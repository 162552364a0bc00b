use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One catalog row. Immutable once loaded; the ranking core only copies and
/// annotates products with derived scores, never mutates them.
///
/// Any numeric attribute may be absent. Attribute values that arrive as
/// strings are coerced to numbers where possible and otherwise treated as
/// missing, matching how a loosely-typed catalog export behaves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(alias = "model")]
    pub title: String,
    pub category: String,
    #[serde(default, deserialize_with = "coerced_number")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    pub ram_gb: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    pub storage_gb: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    pub battery_wh: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "coerced_number")]
    pub screen_inches: Option<f64>,
}

fn coerced_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(crate::ranking::filter::parse_numeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_attributes_coerce_to_numbers() {
        let product: Product = serde_json::from_str(
            r#"{"id": "p1", "title": "Aero 14", "category": "laptop", "price_usd": "$899", "ram_gb": 16}"#,
        )
        .expect("valid product");

        assert_eq!(product.price_usd, Some(899.0));
        assert_eq!(product.ram_gb, Some(16.0));
        assert_eq!(product.storage_gb, None);
    }

    #[test]
    fn model_is_accepted_as_title_alias() {
        let product: Product =
            serde_json::from_str(r#"{"id": "p2", "model": "Vista 27", "category": "monitor"}"#)
                .expect("valid product");

        assert_eq!(product.title, "Vista 27");
    }

    #[test]
    fn garbage_attribute_is_treated_as_missing() {
        let product: Product = serde_json::from_str(
            r#"{"id": "p3", "title": "Slab 11", "category": "tablet", "battery_wh": "unknown"}"#,
        )
        .expect("valid product");

        assert_eq!(product.battery_wh, None);
    }
}
