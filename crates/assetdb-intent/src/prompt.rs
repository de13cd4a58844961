//! Prompt construction for intent resolution.

/// Builds the fixed instruction sent to the language model. The category
/// list is the closed catalog loaded at ingestion, so the model can only be
/// steered toward labels the filter engine understands.
#[derive(Debug, Default)]
pub struct IntentPromptBuilder;

impl IntentPromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, raw_query: &str, categories: &[String]) -> String {
        let category_list = categories.join(", ");
        format!(
            r#"You are the query-understanding step of a property listing search engine.

The user typed: "{raw_query}"

Summarize the user's intent and answer with a single JSON object and nothing else.
Structure:

{{
  "clean_query": "text optimized for semantic search",
  "category": "one of [{category_list}], or an empty string if unclear",
  "min_price": lowest acceptable price as a number, or null,
  "max_price": highest acceptable price as a number, or null,
  "location": "district, road, or area name, or an empty string"
}}

- "no more than X" goes into max_price; "at least X" or "above X" goes into min_price
- use null for any price you cannot determine
- use "" for category when it is not one of the listed labels
- do not add comments or any text outside the JSON object"#
        )
    }
}
