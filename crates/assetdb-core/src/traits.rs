use crate::types::{QueryIntent, SearchHit};
use async_trait::async_trait;

/// Embedding task type. Some providers produce different vectors for
/// documents and queries; both sides of the dot product must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    Document,
    Query,
}

/// Text to fixed-length vector. Vectors are expected to come back
/// L2-normalized so a plain inner product approximates cosine similarity.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    async fn embed_batch(&self, texts: &[String], mode: EmbedMode) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Prompt in, raw text out. The output is not trusted to be well-formed
/// JSON; callers extract and parse defensively.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// The scored candidate universe. Implementations rank the full collection
/// against a query vector, apply the intent's hard filters, add the location
/// boost, and return at most `k` hits in descending score order with ties
/// broken by ingestion order.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn search(
        &self,
        query_vec: &[f32],
        intent: &QueryIntent,
        boost_weight: f32,
        k: usize,
    ) -> anyhow::Result<Vec<SearchHit>>;

    async fn is_empty(&self) -> anyhow::Result<bool>;
}
