use std::sync::Arc;

use async_trait::async_trait;
use shopscout_core::domain::intent::IntentRecord;
use tracing::warn;

use crate::llm::LlmClient;

const INTENT_PROMPT: &str = r#"You are the intent extractor for a shopping assistant.

Extract a strict JSON object from the user's request for buying an
electronic product, with the following fields:

- category: one of ["laptop", "phone", "tablet", "monitor"] (guess if not explicit)
- budget_usd: number if mentioned, else null
- primary_goals: list of strings like ["battery_life", "performance", "portability"]
- hard_constraints: object with things like {"min_ram_gb": 16} if mentioned, else {}
- notes: short free-text note summarizing the intent

IMPORTANT:
- Respond with ONLY valid JSON.
- Do NOT include any extra text."#;

/// Collaborator seam for intent extraction. Infallible by contract: an
/// implementation that cannot produce structured intent must degrade to the
/// minimal fallback record, never error.
#[async_trait]
pub trait IntentSource: Send + Sync {
    async fn extract(&self, query: &str) -> IntentRecord;
}

/// LLM-backed extractor. Any failure - transport, refusal, malformed JSON -
/// degrades to [`IntentRecord::fallback`] with the raw query in `notes`.
pub struct LlmIntentExtractor {
    llm: Arc<dyn LlmClient>,
}

impl LlmIntentExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentSource for LlmIntentExtractor {
    async fn extract(&self, query: &str) -> IntentRecord {
        let prompt = format!("{INTENT_PROMPT}\n\nUser request:\n{query}");
        let raw = match self.llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(event_name = "intent.llm_failed", %error, "falling back to minimal intent");
                return IntentRecord::fallback(query);
            }
        };

        match parse_intent_payload(&raw) {
            Some(intent) => intent,
            None => {
                warn!(event_name = "intent.parse_failed", "llm returned non-JSON intent payload");
                IntentRecord::fallback(query)
            }
        }
    }
}

/// Extract the JSON object from an LLM reply, tolerating code fences and
/// stray prose around the payload.
fn parse_intent_payload(raw: &str) -> Option<IntentRecord> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}
