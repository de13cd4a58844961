//! Builds the listing collection from the exported JSON dumps.
//!
//! Two files are expected: `asset_type_rows.json` (the category catalog,
//! id -> label) and `assets_rows.json` (one row per listing). Each listing is
//! denormalized into a single `text` field once here; it never changes after.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::types::{Listing, PRICE_UNSPECIFIED};

pub const ASSET_TYPES_FILE: &str = "asset_type_rows.json";
pub const ASSETS_FILE: &str = "assets_rows.json";

const UNKNOWN_CATEGORY: &str = "uncategorized";

/// The closed set of category labels the intent resolver and the
/// catalog-label query fallback validate against.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    names: Vec<String>,
}

impl CategoryCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, label: &str) -> bool {
        self.names.iter().any(|n| n == label)
    }
}

#[derive(Debug, Deserialize)]
pub struct AssetTypeRow {
    pub id: i64,
    #[serde(default)]
    pub name_th: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_type_id: Option<i64>,
    #[serde(default)]
    pub name_th: Option<String>,
    #[serde(default)]
    pub asset_details_selling_price: Value,
    #[serde(default)]
    pub location_road_th: Option<String>,
    #[serde(default)]
    pub location_village_th: Option<String>,
    #[serde(default)]
    pub asset_details_description_th: Option<String>,
}

#[derive(Default)]
pub struct ListingLoader;

impl ListingLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load both dumps from `data_dir` and build the listing collection.
    /// Missing files are hard errors; malformed fields within a row degrade
    /// to their defaults instead of failing the load.
    pub fn load_dir(&self, data_dir: &Path) -> Result<(Vec<Listing>, CategoryCatalog)> {
        let types_path = data_dir.join(ASSET_TYPES_FILE);
        let types_raw = fs::read_to_string(&types_path)
            .with_context(|| format!("reading {}", types_path.display()))?;
        let types: Vec<AssetTypeRow> = serde_json::from_str(&types_raw)
            .with_context(|| format!("parsing {}", types_path.display()))?;

        let assets_path = data_dir.join(ASSETS_FILE);
        let assets_raw = fs::read_to_string(&assets_path)
            .with_context(|| format!("reading {}", assets_path.display()))?;
        let assets: Vec<AssetRow> = serde_json::from_str(&assets_raw)
            .with_context(|| format!("parsing {}", assets_path.display()))?;

        Ok(self.build(&types, &assets))
    }

    /// Pure construction from already-parsed rows.
    pub fn build(&self, types: &[AssetTypeRow], assets: &[AssetRow]) -> (Vec<Listing>, CategoryCatalog) {
        let catalog = CategoryCatalog::new(
            types
                .iter()
                .map(|t| t.name_th.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        );

        let listings = assets.iter().map(|row| self.build_listing(row, types)).collect();
        (listings, catalog)
    }

    fn build_listing(&self, row: &AssetRow, types: &[AssetTypeRow]) -> Listing {
        let category = row
            .asset_type_id
            .and_then(|id| types.iter().find(|t| t.id == id))
            .map(|t| t.name_th.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let name = row.name_th.clone().unwrap_or_default();
        let (price_display, price_value) = parse_price(&row.asset_details_selling_price);
        let road = non_empty_or_dash(row.location_road_th.as_deref());
        let project = non_empty_or_dash(row.location_village_th.as_deref());
        let description = row.asset_details_description_th.clone().unwrap_or_default();

        let text = format!(
            "name: {name} | category: {category} | price: {price_display} baht | \
             road: {road} | project: {project} | description: {description}"
        );

        Listing {
            id: row.id,
            code: row.asset_code.clone(),
            text,
            price_display,
            price_value,
            category,
            road,
            project,
        }
    }
}

/// Price parsing invariant: the numeric value is present iff the source
/// price was parseable as a number. The display form keeps the raw text of
/// unparseable prices and uses the "unspecified" sentinel for null.
fn parse_price(raw: &Value) -> (String, Option<f64>) {
    match raw {
        Value::Null => (PRICE_UNSPECIFIED.to_string(), None),
        Value::Number(n) => {
            let display = n.to_string();
            (display, n.as_f64())
        }
        Value::String(s) => {
            let value = s.trim().parse::<f64>().ok();
            (s.clone(), value)
        }
        other => (other.to_string(), None),
    }
}

fn non_empty_or_dash(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}
