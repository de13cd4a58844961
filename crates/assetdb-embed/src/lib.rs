//! `Embedder` implementations.
//!
//! The real provider is the Gemini embedContent endpoint; a deterministic
//! hashing embedder is available for offline runs and tests via
//! `APP_USE_FAKE_EMBEDDINGS=1`, mirroring how the rest of the stack is
//! exercised without network access.

pub mod gemini;
pub mod hash;

pub use gemini::GeminiEmbedder;
pub use hash::HashEmbedder;

use anyhow::Result;
use assetdb_core::traits::Embedder;

pub const EMBEDDING_DIM: usize = 768;

/// Select an embedder: the hashing fake when `APP_USE_FAKE_EMBEDDINGS` is
/// set, otherwise the Gemini client configured from `GEMINI_API_KEY`.
pub fn default_embedder(timeout_secs: u64) -> Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using deterministic hashing embedder");
        return Ok(Box::new(HashEmbedder::new(EMBEDDING_DIM)));
    }
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set and fake embeddings not enabled"))?;
    Ok(Box::new(GeminiEmbedder::new(api_key, timeout_secs)?))
}
