use assetdb_core::ingest::CategoryCatalog;
use assetdb_core::traits::LanguageModel;
use assetdb_core::types::{IntentOutcome, QueryIntent};
use serde::Deserialize;
use serde_json::Value;

use crate::prompt::IntentPromptBuilder;

/// Resolves raw queries into structured intents.
///
/// `resolve` never returns an error: model failures and unparseable output
/// collapse to [`IntentOutcome::Degraded`] carrying the identity fallback,
/// and individual fields that fail to parse degrade to absent on their own.
pub struct IntentResolver {
    model: Box<dyn LanguageModel>,
    catalog: CategoryCatalog,
    prompt: IntentPromptBuilder,
}

/// Wire shape of the model's JSON answer. Everything is optional and loosely
/// typed; normalization happens after parsing.
#[derive(Debug, Deserialize)]
struct RawIntent {
    #[serde(default)]
    clean_query: Option<String>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    min_price: Option<Value>,
    #[serde(default)]
    max_price: Option<Value>,
    #[serde(default)]
    location: Option<Value>,
}

impl IntentResolver {
    pub fn new(model: Box<dyn LanguageModel>, catalog: CategoryCatalog) -> Self {
        Self { model, catalog, prompt: IntentPromptBuilder::new() }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub async fn resolve(&self, raw_query: &str) -> IntentOutcome {
        match self.try_resolve(raw_query).await {
            Ok(intent) => IntentOutcome::Resolved(intent),
            Err(e) => {
                tracing::warn!(error = %e, query = raw_query, "intent resolution degraded to raw query");
                IntentOutcome::Degraded(QueryIntent::fallback(raw_query))
            }
        }
    }

    async fn try_resolve(&self, raw_query: &str) -> anyhow::Result<QueryIntent> {
        let prompt = self.prompt.build(raw_query, self.catalog.names());
        let response = self.model.generate(&prompt).await?;
        let json = extract_json_object(&response);
        let raw: RawIntent = serde_json::from_str(json)?;
        Ok(self.normalize(raw, raw_query))
    }

    fn normalize(&self, raw: RawIntent, raw_query: &str) -> QueryIntent {
        let clean_query = raw
            .clean_query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .unwrap_or_else(|| raw_query.to_string());

        let category = raw
            .category
            .as_ref()
            .and_then(non_empty_string)
            .filter(|c| self.catalog.contains(c));

        QueryIntent {
            clean_query,
            category,
            min_price: raw.min_price.as_ref().and_then(to_float),
            max_price: raw.max_price.as_ref().and_then(to_float),
            location: raw.location.as_ref().and_then(non_empty_string),
        }
    }
}

/// Models are asked for bare JSON but routinely wrap it in prose or code
/// fences. Take the substring between the first `{` and the last `}`; when
/// no such pair exists, hand back the trimmed text and let parsing fail.
fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Numeric fields may come back as numbers or numeric strings; anything
/// else is treated as absent, never as an error.
fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
