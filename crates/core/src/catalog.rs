use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::domain::intent::Category;
use crate::domain::product::Product;
use crate::errors::CatalogError;

/// Read-only handle over the loaded product set. Constructed once and
/// injected into the pipeline; queries never mutate it.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON array of product rows. Rejects duplicate
    /// product ids: downstream results key on them.
    pub fn from_json_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let products: Vec<Product> = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::InvariantViolation(format!(
                    "duplicate product id `{}`",
                    product.id
                )));
            }
        }

        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All rows whose category label matches, in catalog iteration order.
    pub fn in_category(&self, category: Category) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| product.category.trim().eq_ignore_ascii_case(category.as_str()))
            .cloned()
            .collect()
    }

    /// Deterministic demo dataset covering all four categories, used by the
    /// `seed` command and tests.
    pub fn demo() -> Self {
        fn row(
            id: &str,
            title: &str,
            category: &str,
            price_usd: f64,
            ram_gb: Option<f64>,
            storage_gb: Option<f64>,
            battery_wh: Option<f64>,
            weight_kg: Option<f64>,
            screen_inches: Option<f64>,
        ) -> Product {
            Product {
                id: id.to_string(),
                title: title.to_string(),
                category: category.to_string(),
                price_usd: Some(price_usd),
                ram_gb,
                storage_gb,
                battery_wh,
                weight_kg,
                screen_inches,
            }
        }

        Self::new(vec![
            row("lap-001", "Aero 14", "laptop", 849.0, Some(16.0), Some(512.0), Some(63.0), Some(1.4), Some(14.0)),
            row("lap-002", "Forge 16 Pro", "laptop", 1649.0, Some(32.0), Some(1024.0), Some(90.0), Some(2.3), Some(16.0)),
            row("lap-003", "Nomad 13", "laptop", 649.0, Some(8.0), Some(256.0), Some(52.0), Some(1.1), Some(13.3)),
            row("lap-004", "Atlas 15", "laptop", 1099.0, Some(16.0), Some(1024.0), Some(70.0), Some(1.8), Some(15.6)),
            row("lap-005", "Drift 14 Air", "laptop", 949.0, Some(16.0), Some(512.0), Some(75.0), Some(1.2), Some(14.0)),
            row("pho-001", "Pulse 8", "phone", 599.0, Some(8.0), Some(128.0), Some(17.0), Some(0.19), Some(6.1)),
            row("pho-002", "Pulse 8 Ultra", "phone", 999.0, Some(12.0), Some(256.0), Some(19.0), Some(0.22), Some(6.8)),
            row("pho-003", "Ember Lite", "phone", 349.0, Some(6.0), Some(128.0), Some(18.0), Some(0.20), Some(6.5)),
            row("tab-001", "Slab 11", "tablet", 449.0, Some(8.0), Some(128.0), Some(28.0), Some(0.47), Some(11.0)),
            row("tab-002", "Slab 13 Pro", "tablet", 899.0, Some(12.0), Some(512.0), Some(38.0), Some(0.58), Some(13.0)),
            row("tab-003", "Sketchpad 10", "tablet", 329.0, Some(4.0), Some(64.0), Some(26.0), Some(0.45), Some(10.4)),
            row("mon-001", "Vista 27", "monitor", 329.0, None, None, None, Some(4.2), Some(27.0)),
            row("mon-002", "Vista 32 Curve", "monitor", 549.0, None, None, None, Some(6.1), Some(32.0)),
            row("mon-003", "Studio 24", "monitor", 199.0, None, None, None, Some(3.1), Some(23.8)),
        ])
    }
}
