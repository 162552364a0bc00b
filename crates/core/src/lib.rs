pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ranking;

pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError, LoadOptions};
pub use domain::intent::{Category, IntentRecord};
pub use domain::product::Product;
pub use domain::result::{RankedItem, Ranking};
pub use errors::CatalogError;
pub use ranking::filter::{filter_products, resolve_category};
pub use ranking::scorer::{score_candidates, ScoredCandidate, ScoredSet};
pub use ranking::weights::{resolve_weights, WeightSet};
