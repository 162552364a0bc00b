use std::sync::Arc;

use shopscout_core::catalog::Catalog;
use shopscout_core::domain::intent::{Category, IntentRecord};
use shopscout_core::domain::product::Product;
use shopscout_core::domain::result::Ranking;
use shopscout_core::ranking::filter::filter_products;
use shopscout_core::ranking::scorer::score_candidates;
use tracing::{info, warn};

use crate::explain::{ExplanationRequest, ExplanationSource, LlmExplainer};
use crate::intent::{IntentSource, LlmIntentExtractor};
use crate::llm::LlmClient;

/// Everything one query produced: the extracted intent, the filtered
/// candidate rows, and the ranked result.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub intent: IntentRecord,
    pub candidates: Vec<Product>,
    pub ranking: Ranking,
}

/// Request-scoped recommender pipeline: extract intent, filter the catalog,
/// score, then request one explanation per ranked item.
///
/// Each query runs to completion with no shared mutable state; the catalog
/// handle is read-only and derived columns are computed fresh per run.
/// `run` is infallible: every collaborator failure degrades locally with a
/// fallback intent or a placeholder explanation.
pub struct RecommendPipeline {
    catalog: Catalog,
    intents: Box<dyn IntentSource>,
    explainer: Box<dyn ExplanationSource>,
}

impl RecommendPipeline {
    /// Wire the standard LLM-backed collaborators around a shared client.
    pub fn new(catalog: Catalog, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            catalog,
            intents: Box::new(LlmIntentExtractor::new(Arc::clone(&llm))),
            explainer: Box::new(LlmExplainer::new(llm)),
        }
    }

    /// Inject custom collaborators (deterministic stubs in tests).
    pub fn with_sources(
        catalog: Catalog,
        intents: Box<dyn IntentSource>,
        explainer: Box<dyn ExplanationSource>,
    ) -> Self {
        Self { catalog, intents, explainer }
    }

    pub async fn run(&self, query: &str) -> PipelineOutcome {
        let intent = self.intents.extract(query).await;
        info!(
            event_name = "recommend.intent_extracted",
            category = intent.category.as_deref().unwrap_or("unresolved"),
            goals = intent.primary_goals.len(),
            "intent extracted"
        );

        let candidates = filter_products(&self.catalog, &intent, query);
        info!(
            event_name = "recommend.catalog_filtered",
            candidates = candidates.len(),
            "catalog filtered"
        );

        let scored = score_candidates(&intent, &candidates);
        let category = scored.category;
        let mut ranking = Ranking {
            results: Vec::with_capacity(scored.candidates.len()),
            category: category.map(|category| category.as_str().to_string()),
            weights: scored.weights.map(|weights| weights.to_map()).unwrap_or_default(),
        };

        for candidate in scored.candidates {
            let request = ExplanationRequest {
                product: &candidate.product,
                display_score: candidate.display_score,
                // Candidates exist, so the scorer resolved a category.
                category: category.unwrap_or(Category::Laptop),
                goals: &intent.primary_goals,
            };
            let explanation = match self.explainer.explain(request).await {
                Ok(text) => text,
                Err(error) => {
                    warn!(
                        event_name = "recommend.explanation_failed",
                        product_id = %candidate.product.id,
                        %error,
                        "substituting placeholder explanation"
                    );
                    format!("(could not generate explanation: {error})")
                }
            };
            ranking.results.push(candidate.into_ranked_item(explanation));
        }

        info!(event_name = "recommend.ranked", results = ranking.results.len(), "ranking complete");

        PipelineOutcome { intent, candidates, ranking }
    }
}
