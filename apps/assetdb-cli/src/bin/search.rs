use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use assetdb_core::config::{resolve_with_base, Config, DEFAULT_TOP_K};
use assetdb_core::error::Error;
use assetdb_core::ingest::{CategoryCatalog, ListingLoader};
use assetdb_core::traits::{CandidateStore, LanguageModel};
use assetdb_core::types::SearchRequest;
use assetdb_embed::default_embedder;
use assetdb_hybrid::SearchPipeline;
use assetdb_intent::{GeminiGenerator, IntentResolver};
use assetdb_vector::schema::DEFAULT_TABLE;
use assetdb_vector::{LanceStore, MemoryStore};

/// Stands in when no API key is configured: every resolution degrades to
/// the raw-query fallback, which keeps search usable offline.
struct DisabledModel;

#[async_trait]
impl LanguageModel for DisabledModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("intent model disabled: GEMINI_API_KEY not set"))
    }
}

struct Options {
    query: String,
    top_k: usize,
    min_price: Option<f64>,
    max_price: Option<f64>,
    category: Option<String>,
    backend: String,
    data_dir: PathBuf,
    db_path: PathBuf,
    table_name: String,
}

fn parse_args() -> Result<Options> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <query> [--limit N] [--min-price X] [--max-price X] [--category C]",
            args[0]
        );
        eprintln!("       [--backend memory|lance] [--data DIR] [--db PATH] [--table NAME]");
        eprintln!("Example: {} 'house near Riverside under 2m' --limit 5", args[0]);
        std::process::exit(1);
    }

    let base = env::current_dir()?;
    let mut opts = Options {
        query: args[1].clone(),
        top_k: DEFAULT_TOP_K,
        min_price: None,
        max_price: None,
        category: None,
        backend: "memory".to_string(),
        data_dir: PathBuf::from("./data"),
        db_path: PathBuf::from("./indexes/lancedb"),
        table_name: DEFAULT_TABLE.to_string(),
    };

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| anyhow!("{flag} requires a value"))?;
        match flag {
            "--limit" => opts.top_k = value.parse()?,
            "--min-price" => opts.min_price = Some(value.parse()?),
            "--max-price" => opts.max_price = Some(value.parse()?),
            "--category" => opts.category = Some(value.clone()),
            "--backend" => opts.backend = value.clone(),
            "--data" => opts.data_dir = resolve_with_base(&base, value),
            "--db" => opts.db_path = resolve_with_base(&base, value),
            "--table" => opts.table_name = value.clone(),
            _ => return Err(anyhow!("unknown flag: {flag}")),
        }
        i += 2;
    }
    Ok(opts)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = parse_args()?;
    let config = Config::load()?;
    let tuning = config.search_tuning();

    let embedder = default_embedder(tuning.http_timeout_secs)?;

    // The catalog always comes from the JSON dumps; both backends share it.
    let (listings, catalog): (Vec<_>, CategoryCatalog) =
        ListingLoader::new().load_dir(&opts.data_dir)?;

    let store: Box<dyn CandidateStore> = match opts.backend.as_str() {
        "memory" => {
            println!("Embedding {} listings for the in-memory store...", listings.len());
            Box::new(MemoryStore::build(listings, embedder.as_ref()).await?)
        }
        "lance" => Box::new(LanceStore::new(&opts.db_path, &opts.table_name).await?),
        other => return Err(Error::InvalidConfig(format!("unknown backend: {other}")).into()),
    };

    let model: Box<dyn LanguageModel> = match env::var("GEMINI_API_KEY") {
        Ok(key) => Box::new(GeminiGenerator::new(key, tuning.http_timeout_secs)?),
        Err(_) => Box::new(DisabledModel),
    };
    let resolver = IntentResolver::new(model, catalog);
    let pipeline = SearchPipeline::new(resolver, embedder, store, &tuning);

    let request = SearchRequest {
        query: opts.query.clone(),
        top_k: opts.top_k,
        min_price: opts.min_price,
        max_price: opts.max_price,
        category: opts.category.clone(),
    };
    let response = pipeline.search(request).await?;

    println!("\nFound {} results for: \"{}\"", response.results.len(), opts.query);
    println!(
        "Effective intent: query=\"{}\" category={:?} min={:?} max={:?} location={:?}",
        response.intent.clean_query,
        response.intent.category,
        response.intent.min_price,
        response.intent.max_price,
        response.intent.location,
    );
    for (i, hit) in response.results.iter().enumerate() {
        println!(
            "\n  {}. score={:.4}  id={:?}  code={:?}  category={}  price={}",
            i + 1,
            hit.score,
            hit.id,
            hit.code,
            hit.category,
            hit.price,
        );
        println!("     {}", hit.text);
    }
    Ok(())
}
