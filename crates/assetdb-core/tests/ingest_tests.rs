use std::fs;
use tempfile::TempDir;

use assetdb_core::ingest::{ListingLoader, ASSETS_FILE, ASSET_TYPES_FILE};
use assetdb_core::types::PRICE_UNSPECIFIED;

const TYPES: &str = r#"[
    {"id": 1, "name_th": "house"},
    {"id": 2, "name_th": "condo"},
    {"id": 3, "name_th": "  "}
]"#;

const ASSETS: &str = r#"[
    {
        "id": 10,
        "asset_code": "A-10",
        "asset_type_id": 1,
        "name_th": "Corner plot",
        "asset_details_selling_price": 1500000,
        "location_road_th": "Riverside Ave",
        "location_village_th": "Willow Park",
        "asset_details_description_th": "Two floors"
    },
    {
        "id": 11,
        "asset_type_id": 2,
        "asset_details_selling_price": "2500000",
        "location_road_th": null
    },
    {
        "id": 12,
        "asset_type_id": 99,
        "asset_details_selling_price": "call agent"
    },
    {
        "id": 13,
        "asset_type_id": 1,
        "asset_details_selling_price": null
    }
]"#;

fn load() -> (Vec<assetdb_core::types::Listing>, assetdb_core::ingest::CategoryCatalog) {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join(ASSET_TYPES_FILE), TYPES).expect("types");
    fs::write(tmp.path().join(ASSETS_FILE), ASSETS).expect("assets");
    ListingLoader::new().load_dir(tmp.path()).expect("load")
}

#[test]
fn catalog_keeps_trimmed_non_empty_labels() {
    let (_, catalog) = load();
    assert_eq!(catalog.names(), ["house", "condo"]);
    assert!(catalog.contains("condo"));
    assert!(!catalog.contains("castle"));
}

#[test]
fn price_value_present_iff_parseable() {
    let (listings, _) = load();
    assert_eq!(listings[0].price_value, Some(1_500_000.0));
    assert_eq!(listings[1].price_value, Some(2_500_000.0));
    assert_eq!(listings[2].price_value, None);
    assert_eq!(listings[2].price_display, "call agent");
    assert_eq!(listings[3].price_value, None);
    assert_eq!(listings[3].price_display, PRICE_UNSPECIFIED);
}

#[test]
fn category_is_resolved_label_never_the_foreign_key() {
    let (listings, _) = load();
    assert_eq!(listings[0].category, "house");
    assert_eq!(listings[1].category, "condo");
    // unknown type id degrades to a label, not an error
    assert_eq!(listings[2].category, "uncategorized");
}

#[test]
fn text_is_denormalized_with_fixed_separators() {
    let (listings, _) = load();
    let text = &listings[0].text;
    assert!(text.contains("name: Corner plot"));
    assert!(text.contains("| category: house"));
    assert!(text.contains("| price: 1500000 baht"));
    assert!(text.contains("| road: Riverside Ave"));
    assert!(text.contains("| project: Willow Park"));
    assert!(text.contains("| description: Two floors"));
}

#[test]
fn missing_location_fields_default_to_dash() {
    let (listings, _) = load();
    assert_eq!(listings[1].road, "-");
    assert_eq!(listings[1].project, "-");
    assert_eq!(listings[0].road, "Riverside Ave");
}

#[test]
fn missing_files_are_hard_errors() {
    let tmp = TempDir::new().expect("tempdir");
    assert!(ListingLoader::new().load_dir(tmp.path()).is_err());
}
