use std::env;
use std::path::PathBuf;

use assetdb_core::config::{resolve_with_base, Config};
use assetdb_core::ingest::ListingLoader;
use assetdb_core::traits::EmbedMode;
use assetdb_embed::default_embedder;
use assetdb_vector::schema::DEFAULT_TABLE;
use assetdb_vector::LanceWriter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <data_dir> [db_path] [table_name]", args[0]);
        eprintln!("Example: {} ./data ./indexes/lancedb listings", args[0]);
        std::process::exit(1);
    }
    let base = env::current_dir()?;
    let data_dir = resolve_with_base(&base, &args[1]);
    let db_path = args
        .get(2)
        .map(|p| resolve_with_base(&base, p))
        .unwrap_or_else(|| PathBuf::from("./indexes/lancedb"));
    let table_name = args.get(3).map(String::as_str).unwrap_or(DEFAULT_TABLE);

    let config = Config::load()?;
    let tuning = config.search_tuning();

    println!("Loading listings from {}...", data_dir.display());
    let (listings, catalog) = ListingLoader::new().load_dir(&data_dir)?;
    println!(
        "Loaded {} listings across {} categories",
        listings.len(),
        catalog.names().len()
    );
    if listings.is_empty() {
        println!("Nothing to index");
        return Ok(());
    }

    println!("Embedding {} listings (this may take a while)...", listings.len());
    let embedder = default_embedder(tuning.http_timeout_secs)?;
    let texts: Vec<String> = listings.iter().map(|l| l.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts, EmbedMode::Document).await?;

    println!("Writing to {} (table: {})...", db_path.display(), table_name);
    let writer = LanceWriter::new(&db_path, table_name).await?;
    writer.write(&listings, &embeddings).await?;
    println!("Indexed {} listings", listings.len());
    Ok(())
}
