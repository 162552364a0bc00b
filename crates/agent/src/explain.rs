use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shopscout_core::domain::intent::Category;
use shopscout_core::domain::product::Product;

use crate::llm::LlmClient;

/// Everything the explanation collaborator is given for one ranked item:
/// raw attributes, the display score, the resolved category, and the user's
/// stated goals.
pub struct ExplanationRequest<'a> {
    pub product: &'a Product,
    pub display_score: u8,
    pub category: Category,
    pub goals: &'a [String],
}

/// Injected capability for per-item explanation text. Called at most once
/// per ranked item; failures are isolated by the caller and must never
/// affect ranking membership or order.
#[async_trait]
pub trait ExplanationSource: Send + Sync {
    async fn explain(&self, request: ExplanationRequest<'_>) -> Result<String>;
}

/// LLM-backed explanation writer. Asks for a short qualitative fit-and-tradeoff
/// blurb rather than a recitation of the raw numbers.
pub struct LlmExplainer {
    llm: Arc<dyn LlmClient>,
}

impl LlmExplainer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ExplanationSource for LlmExplainer {
    async fn explain(&self, request: ExplanationRequest<'_>) -> Result<String> {
        self.llm.complete(&build_prompt(&request)).await
    }
}

fn build_prompt(request: &ExplanationRequest<'_>) -> String {
    let goals_text = if request.goals.is_empty() {
        "balanced everyday use".to_string()
    } else {
        request.goals.join(", ")
    };
    let attributes = serde_json::to_string(request.product)
        .unwrap_or_else(|_| format!("{:?}", request.product));

    format!(
        r#"You are an expert electronics advisor.

The user cares about: {goals_text}.
Device category: {category}

Here is one candidate product (JSON):
{attributes}

This product has an overall score of {score} out of 100
based on price, performance, battery, and screen (where applicable).

Write a concise explanation (2-3 sentences) focusing on:
- Why this product is a good fit for the user, given their goals
- One clear trade-off or limitation

Avoid repeating raw numbers; instead, speak qualitatively
(e.g., "strong battery life", "lightweight", "a bit more expensive")."#,
        category = request.category,
        score = request.display_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_goals_category_and_score() {
        let product = Product {
            id: "lap-001".to_string(),
            title: "Aero 14".to_string(),
            category: "laptop".to_string(),
            price_usd: Some(849.0),
            ..Product::default()
        };
        let goals = vec!["battery_life".to_string(), "portability".to_string()];

        let prompt = build_prompt(&ExplanationRequest {
            product: &product,
            display_score: 87,
            category: Category::Laptop,
            goals: &goals,
        });

        assert!(prompt.contains("battery_life, portability"));
        assert!(prompt.contains("Device category: laptop"));
        assert!(prompt.contains("score of 87 out of 100"));
        assert!(prompt.contains("Aero 14"));
    }

    #[test]
    fn empty_goals_read_as_balanced_use() {
        let product = Product::default();

        let prompt = build_prompt(&ExplanationRequest {
            product: &product,
            display_score: 50,
            category: Category::Monitor,
            goals: &[],
        });

        assert!(prompt.contains("balanced everyday use"));
    }
}
