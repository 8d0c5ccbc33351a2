mod ats;
mod config;
mod embedding;
mod errors;
mod routes;
mod scoring;
mod state;
mod text;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, EmbedderKind};
use crate::embedding::{Embedder, HashEmbedder, RemoteEmbedder};
use crate::routes::build_router;
use crate::scoring::hybrid::{HybridScorer, MatchScorer};
use crate::scoring::keyword::KeywordMatcher;
use crate::state::AppState;
use crate::text::{DefaultTokenizer, NoSynonyms, SynonymSource, Tokenizer, VectorSynonyms, WordVectors};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumatch v{}", env!("CARGO_PKG_VERSION"));

    let scorer = build_scorer(&config)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires tokenizer, synonym source and embedder into the hybrid scorer.
fn build_scorer(config: &Config) -> Result<Arc<dyn MatchScorer>> {
    let tokenizer: Arc<dyn Tokenizer> = Arc::new(DefaultTokenizer);

    let synonyms: Arc<dyn SynonymSource> = match &config.word_vectors_path {
        Some(path) => {
            let vectors = WordVectors::load(path, config.synonym_vocab_limit)
                .with_context(|| format!("Failed to load word vectors from {}", path.display()))?;
            if vectors.is_empty() {
                warn!("Word vector file {} has no usable entries", path.display());
            }
            info!(
                "Synonym expansion enabled: {} word vectors (threshold {})",
                vectors.len(),
                config.synonyms.threshold
            );
            Arc::new(VectorSynonyms::new(vectors, config.synonyms.clone()))
        }
        None => {
            info!("WORD_VECTORS_PATH not set: keyword matching without synonym expansion");
            Arc::new(NoSynonyms)
        }
    };

    let embedder: Option<Arc<dyn Embedder>> = match config.embedder {
        EmbedderKind::Hash => Some(Arc::new(HashEmbedder::new(
            config.embedding_dim,
            tokenizer.clone(),
        ))),
        EmbedderKind::Remote => {
            let url = config
                .embedding_url
                .clone()
                .context("EMBEDDING_URL is required when EMBEDDER=remote")?;
            Some(Arc::new(RemoteEmbedder::new(
                url,
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_dim,
                config.embedding_timeout,
            )?))
        }
        EmbedderKind::Disabled => None,
    };
    if let Some(embedder) = &embedder {
        info!(
            "Embedder initialized: {} ({} dims)",
            embedder.name(),
            embedder.dimension()
        );
    }

    let keyword = KeywordMatcher::new(tokenizer, synonyms);
    Ok(Arc::new(HybridScorer::new(Some(keyword), embedder)))
}
