use assetdb_core::ranking::{
    inclusion_mask, location_boosts, select_top_k, similarity_scores, EXCLUDED_THRESHOLD,
};
use assetdb_core::types::{Listing, QueryIntent};

fn listing(category: &str, price: Option<f64>, road: &str, project: &str) -> Listing {
    Listing {
        id: None,
        code: None,
        text: format!("name: x | category: {category} | road: {road} | project: {project}"),
        price_display: price.map_or_else(|| "unspecified".to_string(), |p| p.to_string()),
        price_value: price,
        category: category.to_string(),
        road: road.to_string(),
        project: project.to_string(),
    }
}

fn intent() -> QueryIntent {
    QueryIntent::fallback("anything")
}

#[test]
fn similarity_is_dot_product_in_input_order() {
    let query = vec![1.0, 0.0, 2.0];
    let vectors = vec![vec![1.0, 1.0, 1.0], vec![0.0, 5.0, 0.5]];
    let scores = similarity_scores(&query, &vectors);
    assert_eq!(scores, vec![3.0, 1.0]);
}

#[test]
fn similarity_empty_inputs_yield_empty_output() {
    assert!(similarity_scores(&[], &[vec![1.0]]).is_empty());
    assert!(similarity_scores(&[1.0], &[]).is_empty());
}

#[test]
fn unpriced_listing_fails_any_active_bound() {
    let listings = vec![
        listing("house", None, "-", "-"),
        listing("house", Some(2_000_000.0), "-", "-"),
    ];

    let mut with_min = intent();
    with_min.min_price = Some(1.0);
    assert_eq!(inclusion_mask(&listings, &with_min), vec![false, true]);

    let mut with_max = intent();
    with_max.max_price = Some(5_000_000.0);
    assert_eq!(inclusion_mask(&listings, &with_max), vec![false, true]);
}

#[test]
fn min_price_scenario_only_condo_survives() {
    let listings = vec![
        listing("house", Some(1_000_000.0), "-", "-"),
        listing("condo", Some(2_000_000.0), "-", "-"),
    ];
    let mut i = intent();
    i.min_price = Some(1_500_000.0);
    assert_eq!(inclusion_mask(&listings, &i), vec![false, true]);
}

#[test]
fn filters_combine_by_and() {
    let listings = vec![
        listing("condo", Some(2_000_000.0), "-", "-"),
        listing("condo", Some(9_000_000.0), "-", "-"),
        listing("house", Some(2_000_000.0), "-", "-"),
    ];
    let mut i = intent();
    i.category = Some("condo".to_string());
    i.max_price = Some(3_000_000.0);
    assert_eq!(inclusion_mask(&listings, &i), vec![true, false, false]);
}

#[test]
fn absent_filters_pass_everything() {
    let listings = vec![listing("house", None, "-", "-"), listing("condo", Some(1.0), "-", "-")];
    assert_eq!(inclusion_mask(&listings, &intent()), vec![true, true]);
}

#[test]
fn boost_matches_text_or_location_fields_case_sensitively() {
    let listings = vec![
        listing("house", Some(1.0), "Riverside Ave", "-"),
        listing("house", Some(1.0), "-", "Riverside Gardens"),
        listing("house", Some(1.0), "-", "riverside"),
    ];
    let boosts = location_boosts(&listings, Some("Riverside"), 0.5);
    assert_eq!(boosts, vec![0.5, 0.5, 0.0]);
}

#[test]
fn no_location_means_zero_boost() {
    let listings = vec![listing("house", Some(1.0), "Riverside", "-")];
    assert_eq!(location_boosts(&listings, None, 0.5), vec![0.0]);
    assert_eq!(location_boosts(&listings, Some(""), 0.5), vec![0.0]);
}

#[test]
fn boosted_tie_ranks_strictly_higher_by_the_boost_constant() {
    let listings = vec![
        listing("house", Some(1.0), "Hillside", "-"),
        listing("house", Some(1.0), "Riverside", "-"),
    ];
    let base = vec![0.8, 0.8];
    let boosts = location_boosts(&listings, Some("Riverside"), 0.5);
    let mask = vec![true, true];
    let ranked = select_top_k(&base, &boosts, &mask, 2);
    assert_eq!(ranked[0].0, 1);
    assert!((ranked[0].1 - ranked[1].1 - 0.5).abs() < 1e-6);
}

#[test]
fn boost_never_resurrects_a_filtered_out_candidate() {
    let base = vec![0.1, 0.9];
    let boosts = vec![0.5, 0.0];
    let mask = vec![false, true];
    let ranked = select_top_k(&base, &boosts, &mask, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].0, 1);
}

#[test]
fn selection_is_deterministic_and_ties_keep_ingestion_order() {
    let base = vec![0.5, 0.9, 0.5, 0.9];
    let boosts = vec![0.0; 4];
    let mask = vec![true; 4];
    let first = select_top_k(&base, &boosts, &mask, 4);
    for _ in 0..10 {
        assert_eq!(select_top_k(&base, &boosts, &mask, 4), first);
    }
    let order: Vec<usize> = first.iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![1, 3, 0, 2]);
}

#[test]
fn top_k_bound_holds() {
    let base = vec![0.1, 0.2, 0.3, 0.4];
    let boosts = vec![0.0; 4];
    let mask = vec![true, true, false, true];
    assert_eq!(select_top_k(&base, &boosts, &mask, 2).len(), 2);
    assert_eq!(select_top_k(&base, &boosts, &mask, 100).len(), 3);
}

#[test]
fn zero_k_is_clamped_to_one() {
    let ranked = select_top_k(&[0.3, 0.7], &[0.0, 0.0], &[true, true], 0);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].0, 1);
}

#[test]
fn fully_masked_input_selects_nothing() {
    let ranked = select_top_k(&[0.3, 0.7], &[0.5, 0.5], &[false, false], 5);
    assert!(ranked.is_empty());
    assert!(select_top_k(&[], &[], &[], 5).is_empty());
}

#[test]
fn excluded_scores_stay_below_threshold_even_with_boost() {
    let ranked = select_top_k(&[0.9], &[0.5], &[false], 1);
    assert!(ranked.iter().all(|(_, s)| *s > EXCLUDED_THRESHOLD));
    assert!(ranked.is_empty());
}
