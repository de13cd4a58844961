use assetdb_core::traits::{EmbedMode, Embedder};
use assetdb_embed::{default_embedder, HashEmbedder, EMBEDDING_DIM};

#[tokio::test]
async fn hash_embedder_shapes_and_determinism() {
    let embedder = HashEmbedder::new(EMBEDDING_DIM);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder
        .embed_batch(&texts, EmbedMode::Document)
        .await
        .expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), EMBEDDING_DIM, "embedding dim is {EMBEDDING_DIM}");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[tokio::test]
async fn empty_batch_yields_empty_output() {
    let embedder = HashEmbedder::new(EMBEDDING_DIM);
    let embs = embedder
        .embed_batch(&[], EmbedMode::Query)
        .await
        .expect("embed_batch");
    assert!(embs.is_empty());
}

#[tokio::test]
async fn default_embedder_honors_fake_flag() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    let embedder = default_embedder(5).expect("embedder");
    assert_eq!(embedder.dim(), EMBEDDING_DIM);
}
