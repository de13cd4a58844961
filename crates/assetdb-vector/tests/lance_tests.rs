use std::path::Path;

use assetdb_core::traits::CandidateStore;
use assetdb_core::types::{Listing, QueryIntent};
use assetdb_vector::schema::EMBEDDING_DIM;
use assetdb_vector::{LanceStore, LanceWriter};
use tempfile::TempDir;

fn listing(id: i64, category: &str, price: Option<f64>, road: &str) -> Listing {
    Listing {
        id: Some(id),
        code: Some(format!("A-{id}")),
        text: format!(
            "name: listing {id} | category: {category} | price: {} baht | road: {road} | project: - | description: ",
            price.map_or_else(|| "unspecified".to_string(), |p| p.to_string())
        ),
        price_display: price.map_or_else(|| "unspecified".to_string(), |p| p.to_string()),
        price_value: price,
        category: category.to_string(),
        road: road.to_string(),
        project: "-".to_string(),
    }
}

fn axis_vec(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIM as usize];
    v[axis] = 1.0;
    v
}

/// Writes three listings sharing one vector so base scores tie and the
/// filter and boost behaviour is what separates the results.
async fn seeded_store(db_path: &Path) -> LanceStore {
    let listings = vec![
        listing(1, "house", Some(1_000_000.0), "Riverside Ave"),
        listing(2, "house", Some(2_000_000.0), "Hillside Rd"),
        listing(3, "house", None, "Riverside Ave"),
    ];
    let vectors = vec![axis_vec(0); listings.len()];
    let writer = LanceWriter::new(db_path, "listings").await.expect("writer");
    writer.write(&listings, &vectors).await.expect("write");
    LanceStore::new(db_path, "listings").await.expect("store")
}

#[tokio::test]
async fn fresh_database_reports_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let store = LanceStore::new(tmp.path(), "listings").await.expect("store");
    assert!(store.is_empty().await.expect("is_empty"));
}

#[tokio::test]
async fn seeded_database_reports_rows() {
    let tmp = TempDir::new().expect("tempdir");
    let store = seeded_store(tmp.path()).await;
    assert!(!store.is_empty().await.expect("is_empty"));
}

#[tokio::test]
async fn price_bound_excludes_unpriced_listing() {
    let tmp = TempDir::new().expect("tempdir");
    let store = seeded_store(tmp.path()).await;

    let mut intent = QueryIntent::fallback("house");
    intent.min_price = Some(500_000.0);

    let hits = store.search(&axis_vec(0), &intent, 0.5, 10).await.expect("search");
    let ids: Vec<_> = hits.iter().map(|h| h.id).collect();
    assert!(ids.contains(&Some(1)));
    assert!(ids.contains(&Some(2)));
    assert!(!ids.contains(&Some(3)), "unpriced listing must not pass a bound");
}

#[tokio::test]
async fn location_boost_reorders_tied_candidates() {
    let tmp = TempDir::new().expect("tempdir");
    let store = seeded_store(tmp.path()).await;

    let mut intent = QueryIntent::fallback("house by the river");
    intent.location = Some("Riverside".to_string());

    let hits = store.search(&axis_vec(0), &intent, 0.5, 10).await.expect("search");
    assert_eq!(hits.len(), 3);
    // the two Riverside rows outrank the tied Hillside row
    let leaders: Vec<_> = hits[..2].iter().map(|h| h.id).collect();
    assert!(leaders.contains(&Some(1)));
    assert!(leaders.contains(&Some(3)));
    assert_eq!(hits[2].id, Some(2));
    assert!((hits[0].score - hits[2].score - 0.5).abs() < 1e-3);
}

#[tokio::test]
async fn limit_truncates_after_boosting() {
    let tmp = TempDir::new().expect("tempdir");
    let store = seeded_store(tmp.path()).await;

    let mut intent = QueryIntent::fallback("house");
    intent.location = Some("Hillside".to_string());

    let hits = store.search(&axis_vec(0), &intent, 0.5, 1).await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, Some(2), "boosted row wins the single slot");
}
