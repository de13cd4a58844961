//! The pure scoring, filtering, boosting, and selection engines.
//!
//! All four functions are total over well-typed inputs: no allocation
//! failure aside, nothing here can fail once vectors and listings exist.
//! Each returns one entry per candidate in input order, so the pipeline can
//! zip them back together by index.

use crate::types::{Listing, QueryIntent};

/// Sentinel assigned to candidates excluded by the hard filter. Far below
/// any attainable similarity so they sort last.
pub const EXCLUDED_SCORE: f32 = -1e9;

/// Anything at or below this never surfaces, even when `k` exceeds the
/// number of surviving candidates.
pub const EXCLUDED_THRESHOLD: f32 = -1e8;

/// Base relevance: inner product of the query vector with each candidate
/// vector. Vectors are assumed pre-normalized by the embedder, so this
/// approximates cosine similarity. Empty input yields an empty output.
pub fn similarity_scores(query_vec: &[f32], vectors: &[Vec<f32>]) -> Vec<f32> {
    if query_vec.is_empty() {
        return Vec::new();
    }
    vectors
        .iter()
        .map(|v| v.iter().zip(query_vec.iter()).map(|(a, b)| a * b).sum())
        .collect()
}

/// Hard filter mask, `true` = keep. Active filters combine by AND:
/// - category: exact label equality
/// - min/max price: a listing with no numeric price fails any active bound
pub fn inclusion_mask(listings: &[Listing], intent: &QueryIntent) -> Vec<bool> {
    listings
        .iter()
        .map(|listing| {
            if let Some(category) = &intent.category {
                if &listing.category != category {
                    return false;
                }
            }
            if let Some(min) = intent.min_price {
                match listing.price_value {
                    Some(p) if p >= min => {}
                    _ => return false,
                }
            }
            if let Some(max) = intent.max_price {
                match listing.price_value {
                    Some(p) if p <= max => {}
                    _ => return false,
                }
            }
            true
        })
        .collect()
}

/// Soft location boost: `weight` for every listing whose full text or either
/// structured location sub-field contains the token, 0 otherwise. Matching
/// is case-sensitive substring containment. Reorders, never excludes.
pub fn location_boosts(listings: &[Listing], location: Option<&str>, weight: f32) -> Vec<f32> {
    let Some(token) = location.filter(|t| !t.is_empty()) else {
        return vec![0.0; listings.len()];
    };
    listings
        .iter()
        .map(|listing| {
            let hit = listing.text.contains(token)
                || listing.road.contains(token)
                || listing.project.contains(token);
            if hit {
                weight
            } else {
                0.0
            }
        })
        .collect()
}

/// Deterministic top-K selection over `base + boost`.
///
/// Masked-out candidates get [`EXCLUDED_SCORE`] and are dropped after the
/// sort rather than surfaced. The sort is stable and descending, so equal
/// scores keep ingestion order. `k` is clamped to at least 1 but the result
/// never exceeds the number of surviving candidates.
pub fn select_top_k(
    base_scores: &[f32],
    boosts: &[f32],
    mask: &[bool],
    k: usize,
) -> Vec<(usize, f32)> {
    let k = k.max(1);
    let mut ranked: Vec<(usize, f32)> = base_scores
        .iter()
        .zip(boosts.iter())
        .zip(mask.iter())
        .enumerate()
        .map(|(i, ((base, boost), keep))| {
            let score = if *keep { base + boost } else { EXCLUDED_SCORE };
            (i, score)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(k)
        .filter(|(_, score)| *score > EXCLUDED_THRESHOLD)
        .collect()
}
