//! In-memory candidate store: listings plus index-aligned vectors, built
//! once at startup and immutable afterwards. Concurrent queries share it
//! read-only; a reload constructs a fresh value rather than mutating.

use anyhow::{ensure, Result};
use assetdb_core::ranking::{inclusion_mask, location_boosts, select_top_k, similarity_scores};
use assetdb_core::traits::{CandidateStore, EmbedMode, Embedder};
use assetdb_core::types::{Listing, QueryIntent, SearchHit};
use async_trait::async_trait;

pub struct MemoryStore {
    listings: Vec<Listing>,
    vectors: Vec<Vec<f32>>,
}

impl MemoryStore {
    /// Wrap pre-embedded listings. Vectors must align one-to-one with the
    /// listing collection in ingestion order.
    pub fn new(listings: Vec<Listing>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        ensure!(
            listings.len() == vectors.len(),
            "listing/vector count mismatch: {} vs {}",
            listings.len(),
            vectors.len()
        );
        Ok(Self { listings, vectors })
    }

    /// Embed every listing's denormalized text and build the store.
    pub async fn build(listings: Vec<Listing>, embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = listings.iter().map(|l| l.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts, EmbedMode::Document).await?;
        Self::new(listings, vectors)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn search(
        &self,
        query_vec: &[f32],
        intent: &QueryIntent,
        boost_weight: f32,
        k: usize,
    ) -> Result<Vec<SearchHit>> {
        let base = similarity_scores(query_vec, &self.vectors);
        if base.is_empty() {
            return Ok(Vec::new());
        }
        let mask = inclusion_mask(&self.listings, intent);
        let boosts = location_boosts(&self.listings, intent.location.as_deref(), boost_weight);
        let ranked = select_top_k(&base, &boosts, &mask, k);
        Ok(ranked
            .into_iter()
            .map(|(idx, score)| SearchHit::from_listing(&self.listings[idx], score))
            .collect())
    }

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.listings.is_empty())
    }
}
