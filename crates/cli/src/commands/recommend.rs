use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use shopscout_agent::{HttpLlmClient, PipelineOutcome, RecommendPipeline};
use shopscout_core::catalog::Catalog;
use shopscout_core::config::{AppConfig, LoadOptions};
use shopscout_core::domain::product::Product;
use shopscout_core::domain::result::Ranking;
use shopscout_core::IntentRecord;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct RecommendReport<'a> {
    query: &'a str,
    intent: &'a IntentRecord,
    candidates: &'a [Product],
    ranking: &'a Ranking,
}

pub fn run(query: &str, catalog_override: Option<&Path>, json_output: bool) -> CommandResult {
    if query.trim().is_empty() {
        return CommandResult::failure("recommend", "empty_query", "query must not be empty", 2);
    }

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    crate::init_logging(&config);

    let catalog_path = catalog_override.unwrap_or(&config.catalog.path);
    let catalog = match Catalog::from_json_path(catalog_path) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "catalog_load",
                format!("{error} (run `shopscout seed` to create a demo catalog)"),
                4,
            );
        }
    };

    let llm = match HttpLlmClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure("recommend", "llm_client", error.to_string(), 5);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let pipeline = RecommendPipeline::new(catalog, Arc::new(llm));
    let outcome = runtime.block_on(pipeline.run(query));

    let output = if json_output {
        render_json(query, &outcome)
    } else {
        render_cards(query, &outcome)
    };
    CommandResult { exit_code: 0, output }
}

fn render_json(query: &str, outcome: &PipelineOutcome) -> String {
    let report = RecommendReport {
        query,
        intent: &outcome.intent,
        candidates: &outcome.candidates,
        ranking: &outcome.ranking,
    };
    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|error| format!("{{\"error\": \"serialization failed: {error}\"}}"))
}

fn render_cards(query: &str, outcome: &PipelineOutcome) -> String {
    let ranking = &outcome.ranking;
    let mut lines = vec![format!("query: {query}")];

    match &ranking.category {
        Some(category) => lines.push(format!("category: {category}")),
        None => {
            lines.push("no matching products found".to_string());
            return lines.join("\n");
        }
    }

    let weights = ranking
        .weights
        .iter()
        .map(|(criterion, weight)| format!("{criterion} {weight:.2}"))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("weights: {weights}"));
    lines.push(String::new());

    for (rank, item) in ranking.results.iter().enumerate() {
        lines.push(format!("{}. {}  [score {}]", rank + 1, item.title, item.score));
        if let Some(product) = outcome.candidates.iter().find(|product| product.id == item.id) {
            lines.push(format!("   {}", spec_line(product)));
        }
        if !item.explanation.is_empty() {
            lines.push(format!("   {}", item.explanation));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn spec_line(product: &Product) -> String {
    fn field(value: Option<f64>, suffix: &str) -> String {
        value.map_or_else(|| format!("n/a {suffix}"), |v| format!("{v} {suffix}"))
    }

    [
        field(product.price_usd, "USD"),
        field(product.ram_gb, "GB RAM"),
        field(product.storage_gb, "GB storage"),
        field(product.battery_wh, "Wh battery"),
        field(product.weight_kg, "kg"),
    ]
    .join(" | ")
}
