use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One ranked entry as surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub id: String,
    pub title: String,
    /// Display score: the continuous [0,1] score rounded onto [0,100].
    pub score: u8,
    pub explanation: String,
}

/// Terminal artifact of one query. `results` is sorted non-increasing by
/// score; ties preserve catalog iteration order. An empty candidate set is
/// represented as an empty ranking, not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub results: Vec<RankedItem>,
    pub category: Option<String>,
    pub weights: BTreeMap<String, f64>,
}

impl Ranking {
    pub fn empty() -> Self {
        Self::default()
    }
}
