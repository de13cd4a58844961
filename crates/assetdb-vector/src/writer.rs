//! Batch writer for the LanceDB listings table.

use anyhow::{ensure, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;

use arrow_array::{
    FixedSizeListArray, Float64Array, Int64Array, RecordBatch, RecordBatchIterator, StringArray,
};

use assetdb_core::types::Listing;

use crate::schema::{build_listing_schema, EMBEDDING_DIM};

pub struct LanceWriter {
    db: Connection,
    table_name: String,
}

impl LanceWriter {
    pub async fn new(db_path: &Path, table_name: &str) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, table_name: table_name.to_string() })
    }

    /// Write listings and their vectors, creating the table on first use.
    /// Vectors must be index-aligned with the listings.
    pub async fn write(&self, listings: &[Listing], embeddings: &[Vec<f32>]) -> Result<()> {
        if listings.is_empty() {
            tracing::debug!("no listings to write");
            return Ok(());
        }
        ensure!(
            listings.len() == embeddings.len(),
            "listing/vector count mismatch: {} vs {}",
            listings.len(),
            embeddings.len()
        );

        let pb = ProgressBar::new(listings.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} listings ({percent}%)")?
                .progress_chars("#>-"),
        );

        let batch_size = 1000usize;
        for (chunk_listings, chunk_vectors) in listings
            .chunks(batch_size)
            .zip(embeddings.chunks(batch_size))
        {
            let batch = listings_to_record_batch(chunk_listings, chunk_vectors)?;
            self.insert_batch(batch).await?;
            pb.inc(chunk_listings.len() as u64);
        }
        pb.finish_with_message("indexing completed");
        Ok(())
    }

    async fn insert_batch(&self, batch: RecordBatch) -> Result<()> {
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        if self.db.table_names().execute().await?.contains(&self.table_name) {
            self.db
                .open_table(&self.table_name)
                .execute()
                .await?
                .add(reader)
                .execute()
                .await?;
        } else {
            self.db.create_table(&self.table_name, reader).execute().await?;
        }
        Ok(())
    }
}

fn listings_to_record_batch(listings: &[Listing], embeddings: &[Vec<f32>]) -> Result<RecordBatch> {
    let schema = build_listing_schema();

    let ids: Vec<Option<i64>> = listings.iter().map(|l| l.id).collect();
    let codes: Vec<Option<String>> = listings.iter().map(|l| l.code.clone()).collect();
    let texts: Vec<String> = listings.iter().map(|l| l.text.clone()).collect();
    let price_displays: Vec<String> = listings.iter().map(|l| l.price_display.clone()).collect();
    let price_values: Vec<Option<f64>> = listings.iter().map(|l| l.price_value).collect();
    let categories: Vec<String> = listings.iter().map(|l| l.category.clone()).collect();
    let roads: Vec<String> = listings.iter().map(|l| l.road.clone()).collect();
    let projects: Vec<String> = listings.iter().map(|l| l.project.clone()).collect();
    let vectors: Vec<Option<Vec<Option<f32>>>> = embeddings
        .iter()
        .map(|v| Some(v.iter().map(|&x| Some(x)).collect()))
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(codes)),
            Arc::new(StringArray::from(texts)),
            Arc::new(StringArray::from(price_displays)),
            Arc::new(Float64Array::from(price_values)),
            Arc::new(StringArray::from(categories)),
            Arc::new(StringArray::from(roads)),
            Arc::new(StringArray::from(projects)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<
                arrow_array::types::Float32Type,
                _,
                _,
            >(vectors.into_iter(), EMBEDDING_DIM)),
        ],
    )?;
    Ok(batch)
}
