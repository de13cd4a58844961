use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub const EMBEDDING_DIM: i32 = 768;
pub const DEFAULT_TABLE: &str = "listings";

pub fn build_listing_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, true),
        Field::new("code", DataType::Utf8, true),
        Field::new("text", DataType::Utf8, false),
        Field::new("price_display", DataType::Utf8, false),
        Field::new("price_value", DataType::Float64, true),
        Field::new("category", DataType::Utf8, false),
        Field::new("road", DataType::Utf8, false),
        Field::new("project", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                EMBEDDING_DIM,
            ),
            true,
        ),
    ]))
}
