use std::sync::Arc;

use crate::config::Config;
use crate::scoring::hybrid::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable match scorer. Default: HybridScorer with the hash embedder. Swap via EMBEDDER env.
    pub scorer: Arc<dyn MatchScorer>,
}
