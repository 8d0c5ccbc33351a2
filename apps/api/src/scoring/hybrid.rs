//! Hybrid scorer: pluggable, trait-based résumé/job-description matcher.
//!
//! Default: `HybridScorer` (keyword overlap + embedding similarity, weighted by
//! `alpha`, default 0.6 toward keywords).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>` built once at startup. A missing
//! tokenizer or embedder is a typed capability gap: the affected sub-score is
//! 0.0 with status `dependency_unavailable`, never an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::scoring::keyword::KeywordMatcher;
use crate::scoring::models::{MatchScore, ScoreStatus, SubScore};
use crate::scoring::semantic::semantic_score;

pub const DEFAULT_ALPHA: f64 = 0.6;

/// The match scorer trait. Implement this to swap backends without touching
/// the endpoint or handler code.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        job_description: &str,
        resume_text: &str,
        alpha: f64,
    ) -> Result<MatchScore, AppError>;
}

/// Rejects weights outside [0, 1] (and NaN).
pub fn validate_alpha(alpha: f64) -> Result<f64, AppError> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(AppError::Validation(format!(
            "alpha must be between 0 and 1, got {alpha}"
        )))
    }
}

pub struct HybridScorer {
    keyword: Option<KeywordMatcher>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl HybridScorer {
    pub fn new(keyword: Option<KeywordMatcher>, embedder: Option<Arc<dyn Embedder>>) -> Self {
        if keyword.is_none() {
            warn!("Hybrid scorer built without a tokenizer: keyword scores will be 0");
        }
        if embedder.is_none() {
            warn!("Hybrid scorer built without an embedder: semantic scores will be 0");
        }
        Self { keyword, embedder }
    }
}

#[async_trait]
impl MatchScorer for HybridScorer {
    async fn score(
        &self,
        job_description: &str,
        resume_text: &str,
        alpha: f64,
    ) -> Result<MatchScore, AppError> {
        let alpha = validate_alpha(alpha)?;

        let keyword = match &self.keyword {
            Some(matcher) => matcher.score(job_description, resume_text),
            None => SubScore::fallback(ScoreStatus::DependencyUnavailable),
        };

        let semantic = match &self.embedder {
            Some(embedder) => semantic_score(embedder.as_ref(), job_description, resume_text).await,
            None => SubScore::fallback(ScoreStatus::DependencyUnavailable),
        };

        let score = MatchScore::from_parts(keyword, semantic, alpha);
        debug!("Scored pair: {score}");
        Ok(score)
    }
}
