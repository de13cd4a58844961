use std::path::{Path, PathBuf};

use assetdb_core::config::{expand_path, resolve_with_base, SearchTuning, DEFAULT_TOP_K};
use assetdb_core::types::SearchRequest;

#[test]
fn relative_path_resolves_against_base() {
    let resolved = resolve_with_base(Path::new("/srv/assetdb"), "data/listings");
    assert_eq!(resolved, PathBuf::from("/srv/assetdb/data/listings"));
}

#[test]
fn absolute_path_ignores_base() {
    let resolved = resolve_with_base(Path::new("/srv/assetdb"), "/var/lib/lancedb");
    assert_eq!(resolved, PathBuf::from("/var/lib/lancedb"));
}

#[test]
fn env_vars_expand_before_resolution() {
    std::env::set_var("ASSETDB_TEST_ROOT", "/opt/indexes");
    let resolved = resolve_with_base(Path::new("/srv/assetdb"), "${ASSETDB_TEST_ROOT}/lancedb");
    assert_eq!(resolved, PathBuf::from("/opt/indexes/lancedb"));

    let expanded = expand_path("${ASSETDB_TEST_ROOT}/lancedb");
    assert_eq!(expanded, PathBuf::from("/opt/indexes/lancedb"));
}

#[test]
fn request_default_limit_matches_tuning_default() {
    let request: SearchRequest =
        serde_json::from_str(r#"{"query": "lakeside cabin"}"#).expect("minimal request");
    assert_eq!(request.top_k, DEFAULT_TOP_K);
    assert_eq!(SearchRequest::new("lakeside cabin").top_k, DEFAULT_TOP_K);
    assert_eq!(SearchTuning::default().top_k, DEFAULT_TOP_K);
}
