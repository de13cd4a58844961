//! The hybrid retrieval pipeline.
//!
//! Sequences intent resolution, query augmentation, query embedding, and
//! store search into one request path. Stateless per request beyond the
//! shared read-only candidate store; external failures degrade to either a
//! usable fallback intent or an explicit empty result, never an error
//! escaping this boundary.

use anyhow::Result;
use assetdb_core::config::SearchTuning;
use assetdb_core::ingest::CategoryCatalog;
use assetdb_core::traits::{CandidateStore, EmbedMode, Embedder};
use assetdb_core::types::{QueryIntent, SearchRequest, SearchResponse};
use assetdb_intent::IntentResolver;

/// Token inserted between the clean query and an inferred location so the
/// embedding captures locational context.
const LOCATION_CONNECTIVE: &str = "near";

pub struct SearchPipeline {
    resolver: IntentResolver,
    embedder: Box<dyn Embedder>,
    store: Box<dyn CandidateStore>,
    boost_weight: f32,
}

impl SearchPipeline {
    pub fn new(
        resolver: IntentResolver,
        embedder: Box<dyn Embedder>,
        store: Box<dyn CandidateStore>,
        tuning: &SearchTuning,
    ) -> Self {
        Self {
            resolver,
            embedder,
            store,
            boost_weight: tuning.location_boost,
        }
    }

    /// Run one search. The `Err` arm covers store I/O only; a query that
    /// cannot be semantically resolved still returns results from the raw
    /// text, and filters that exclude everything return an empty list.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        let outcome = self.resolver.resolve(&request.query).await;
        if outcome.is_degraded() {
            tracing::debug!(query = %request.query, "searching with fallback intent");
        }
        let intent = augment(&request, outcome.into_intent(), self.resolver.catalog());

        if self.store.is_empty().await? {
            tracing::debug!("candidate store is empty, skipping query embedding");
            return Ok(SearchResponse::empty(intent));
        }

        let query_vec = match self
            .embedder
            .embed_batch(&[intent.clean_query.clone()], EmbedMode::Query)
            .await
        {
            Ok(vectors) => vectors.into_iter().next().unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "query embedding failed, returning empty result");
                return Ok(SearchResponse::empty(intent));
            }
        };
        if query_vec.is_empty() {
            tracing::warn!("embedder returned no vector for the query");
            return Ok(SearchResponse::empty(intent));
        }

        let results = self
            .store
            .search(&query_vec, &intent, self.boost_weight, request.top_k)
            .await?;
        if results.is_empty() {
            tracing::debug!("no candidates survived filtering");
        }
        Ok(SearchResponse { results, intent })
    }
}

/// Merge the caller's explicit filters with the inferred intent.
///
/// - caller-supplied category and price bounds always win over inferred ones
/// - an inferred location not already present in the clean query is appended
///   with a fixed connective so it reaches the embedding
/// - a query text that exactly matches a catalog label becomes a category
///   filter when none is set
pub fn augment(
    request: &SearchRequest,
    mut intent: QueryIntent,
    catalog: &CategoryCatalog,
) -> QueryIntent {
    if request.category.is_some() {
        intent.category = request.category.clone();
    }
    if request.min_price.is_some() {
        intent.min_price = request.min_price;
    }
    if request.max_price.is_some() {
        intent.max_price = request.max_price;
    }

    if let Some(location) = &intent.location {
        if !intent.clean_query.contains(location.as_str()) {
            intent.clean_query =
                format!("{} {LOCATION_CONNECTIVE} {location}", intent.clean_query);
        }
    }

    let text = intent.clean_query.trim();
    if intent.category.is_none() && catalog.contains(text) {
        intent.category = Some(text.to_string());
    }

    intent
}
