//! Domain types shared by the intent, store, and pipeline crates.

use serde::{Deserialize, Serialize};

/// Marker used in `price_display` when the source row carried no price.
pub const PRICE_UNSPECIFIED: &str = "unspecified";

/// One retrievable listing, built once at ingestion and read-only after.
///
/// - `text`: denormalized representation used both for embedding and for
///   location substring matching
/// - `price_value`: present iff the source price parsed as a number
/// - `road`/`project`: structured location sub-fields kept separately from
///   `text` so the boost can consult either
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub text: String,
    pub price_display: String,
    pub price_value: Option<f64>,
    pub category: String,
    pub road: String,
    pub project: String,
}

/// Structured interpretation of a raw query.
///
/// Every optional field degrades to `None` on a field-level parse failure;
/// only total resolution failure produces [`QueryIntent::fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub clean_query: String,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
}

impl QueryIntent {
    /// The safe identity intent: the raw query with no inferred filters.
    pub fn fallback(raw_query: &str) -> Self {
        Self {
            clean_query: raw_query.to_string(),
            category: None,
            min_price: None,
            max_price: None,
            location: None,
        }
    }
}

/// Outcome of intent resolution. Resolution is a total function: a failed
/// or partial resolution surfaces as `Degraded`, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Resolved(QueryIntent),
    Degraded(QueryIntent),
}

impl IntentOutcome {
    pub fn intent(&self) -> &QueryIntent {
        match self {
            Self::Resolved(intent) | Self::Degraded(intent) => intent,
        }
    }

    pub fn into_intent(self) -> QueryIntent {
        match self {
            Self::Resolved(intent) | Self::Degraded(intent) => intent,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Caller-facing search parameters. Explicit filters here always take
/// precedence over filters inferred from the query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_top_k() -> usize {
    crate::config::DEFAULT_TOP_K
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: default_top_k(),
            min_price: None,
            max_price: None,
            category: None,
        }
    }
}

/// One ranked result. `score` already includes the location boost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub text: String,
    pub score: f32,
    pub price: String,
    pub category: String,
}

impl SearchHit {
    pub fn from_listing(listing: &Listing, score: f32) -> Self {
        Self {
            id: listing.id,
            code: listing.code.clone(),
            text: listing.text.clone(),
            score,
            price: listing.price_display.clone(),
            category: listing.category.clone(),
        }
    }
}

/// Final response payload: ranked hits plus the effective intent that
/// produced them (after augmentation), kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub intent: QueryIntent,
}

impl SearchResponse {
    pub fn empty(intent: QueryIntent) -> Self {
        Self { results: Vec::new(), intent }
    }
}
