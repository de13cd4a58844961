//! LanceDB-backed candidate store.
//!
//! Ranking is delegated to the table's native vector search and the hard
//! filters become pushdown predicates with the same semantics as the
//! in-memory mask (a NULL `price_value` never satisfies a bound). The
//! location boost cannot be pushed down, so the store overfetches, boosts
//! the fetched rows client-side, and truncates to `k`.

use anyhow::{anyhow, Result};
use assetdb_core::ranking::{location_boosts, select_top_k};
use assetdb_core::traits::CandidateStore;
use assetdb_core::types::{Listing, QueryIntent, SearchHit};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection};
use std::path::Path;

// Fetch more than k so the boost can reorder past the native cutoff.
const OVERFETCH: usize = 10;

pub struct LanceStore {
    db: Connection,
    table_name: String,
}

impl LanceStore {
    pub async fn new(db_path: &Path, table_name: &str) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, table_name: table_name.to_string() })
    }

    async fn fetch_candidates(
        &self,
        query_vec: &[f32],
        intent: &QueryIntent,
        limit: usize,
    ) -> Result<Vec<(Listing, f32)>> {
        let table = self.db.open_table(&self.table_name).execute().await?;
        let mut query = table.vector_search(query_vec.to_vec())?.limit(limit);
        if let Some(predicate) = filter_predicate(intent) {
            query = query.only_if(predicate);
        }

        let mut stream = query.execute().await?;
        let mut candidates = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            let ids = int64_column(&batch, "id")?;
            let codes = string_column(&batch, "code")?;
            let texts = string_column(&batch, "text")?;
            let price_displays = string_column(&batch, "price_display")?;
            let price_values = float64_column(&batch, "price_value")?;
            let categories = string_column(&batch, "category")?;
            let roads = string_column(&batch, "road")?;
            let projects = string_column(&batch, "project")?;
            let distances = float32_column(&batch, "_distance")?;

            for i in 0..batch.num_rows() {
                let listing = Listing {
                    id: if ids.is_null(i) { None } else { Some(ids.value(i)) },
                    code: if codes.is_null(i) { None } else { Some(codes.value(i).to_string()) },
                    text: texts.value(i).to_string(),
                    price_display: price_displays.value(i).to_string(),
                    price_value: if price_values.is_null(i) { None } else { Some(price_values.value(i)) },
                    category: categories.value(i).to_string(),
                    road: roads.value(i).to_string(),
                    project: projects.value(i).to_string(),
                };
                // same orientation as the in-memory dot product: higher = better
                let base_score = 1.0 - distances.value(i);
                candidates.push((listing, base_score));
            }
        }
        Ok(candidates)
    }
}

#[async_trait]
impl CandidateStore for LanceStore {
    async fn search(
        &self,
        query_vec: &[f32],
        intent: &QueryIntent,
        boost_weight: f32,
        k: usize,
    ) -> Result<Vec<SearchHit>> {
        if query_vec.is_empty() {
            return Ok(Vec::new());
        }
        let k = k.max(1);
        let candidates = self.fetch_candidates(query_vec, intent, k * OVERFETCH).await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let listings: Vec<Listing> = candidates.iter().map(|(l, _)| l.clone()).collect();
        let base: Vec<f32> = candidates.iter().map(|(_, s)| *s).collect();
        // hard filters were pushed down, so everything fetched is included
        let mask = vec![true; listings.len()];
        let boosts = location_boosts(&listings, intent.location.as_deref(), boost_weight);
        let ranked = select_top_k(&base, &boosts, &mask, k);

        Ok(ranked
            .into_iter()
            .map(|(idx, score)| SearchHit::from_listing(&listings[idx], score))
            .collect())
    }

    async fn is_empty(&self) -> Result<bool> {
        let names = self.db.table_names().execute().await?;
        if !names.contains(&self.table_name) {
            return Ok(true);
        }
        let table = self.db.open_table(&self.table_name).execute().await?;
        Ok(table.count_rows(None).await? == 0)
    }
}

/// Translate the hard filters to a pushdown predicate. `None` when the
/// intent carries no filter at all.
fn filter_predicate(intent: &QueryIntent) -> Option<String> {
    let mut predicates = Vec::new();
    if let Some(category) = &intent.category {
        predicates.push(format!("category = '{}'", category.replace('\'', "''")));
    }
    if let Some(min) = intent.min_price {
        predicates.push(format!("price_value IS NOT NULL AND price_value >= {min}"));
    }
    if let Some(max) = intent.max_price {
        predicates.push(format!("price_value IS NOT NULL AND price_value <= {max}"));
    }
    if predicates.is_empty() {
        None
    } else {
        Some(predicates.join(" AND "))
    }
}

fn string_column<'a>(
    batch: &'a arrow_array::RecordBatch,
    name: &str,
) -> Result<&'a arrow_array::StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<arrow_array::StringArray>())
        .ok_or_else(|| anyhow!("missing or mistyped column '{name}'"))
}

fn int64_column<'a>(
    batch: &'a arrow_array::RecordBatch,
    name: &str,
) -> Result<&'a arrow_array::Int64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<arrow_array::Int64Array>())
        .ok_or_else(|| anyhow!("missing or mistyped column '{name}'"))
}

fn float64_column<'a>(
    batch: &'a arrow_array::RecordBatch,
    name: &str,
) -> Result<&'a arrow_array::Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<arrow_array::Float64Array>())
        .ok_or_else(|| anyhow!("missing or mistyped column '{name}'"))
}

fn float32_column<'a>(
    batch: &'a arrow_array::RecordBatch,
    name: &str,
) -> Result<&'a arrow_array::Float32Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<arrow_array::Float32Array>())
        .ok_or_else(|| anyhow!("missing or mistyped column '{name}'"))
}
