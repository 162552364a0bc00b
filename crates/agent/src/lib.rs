//! LLM collaborators and pipeline orchestration.
//!
//! This crate wraps the two external, fallible, latency-bearing calls the
//! recommender depends on and wires them around the deterministic ranking
//! core:
//! 1. **Intent extraction** (`intent`) - Parse free text into an `IntentRecord`
//! 2. **Explanation generation** (`explain`) - Per-item qualitative text
//! 3. **Pipeline** (`runtime`) - filter, weight, score, explain, per query
//!
//! # Key Types
//!
//! - `RecommendPipeline` - Request-scoped orchestrator (see `runtime`)
//! - `LlmClient` - Pluggable trait over OpenAI-compatible chat endpoints
//! - `IntentSource` / `ExplanationSource` - Injected collaborator seams
//!
//! # Degradation Principle
//!
//! The LLM never decides scores or ordering; those are deterministic outputs
//! of the ranking core. When an LLM call fails the pipeline degrades - a
//! fallback intent record or a placeholder explanation - and never drops or
//! reorders a ranked item.

pub mod explain;
pub mod intent;
pub mod llm;
pub mod runtime;

pub use explain::{ExplanationRequest, ExplanationSource, LlmExplainer};
pub use intent::{IntentSource, LlmIntentExtractor};
pub use llm::{HttpLlmClient, LlmClient};
pub use runtime::{PipelineOutcome, RecommendPipeline};
