//! Multi-criteria ranking engine.
//!
//! Turns a filtered candidate set and an intent record into a ranked,
//! comparable shortlist: direction-aware min-max normalization, goal-driven
//! weight resolution, and a fixed linear scoring formula. Every failure mode
//! in this module recovers locally with a deterministic fallback; nothing in
//! here returns an error.

pub mod filter;
pub mod normalize;
pub mod scorer;
pub mod weights;

pub use filter::{filter_products, resolve_category};
pub use normalize::{normalize_column, Direction};
pub use scorer::{score_candidates, ScoredCandidate, ScoredSet};
pub use weights::{resolve_weights, Criterion, WeightSet};

/// Score assigned to entries that carry no usable signal for a feature.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Fixed increment added to a criterion's base weight per matching goal.
/// Bumps accumulate additively and are deliberately uncapped: two synonyms
/// for the same goal bump twice.
pub const GOAL_BUMP: f64 = 0.15;

/// Share of the performance proxy contributed by RAM vs. storage.
pub const PERFORMANCE_RAM_SHARE: f64 = 0.7;
pub const PERFORMANCE_STORAGE_SHARE: f64 = 0.3;
