use std::fmt;

use serde::{Deserialize, Serialize};

/// How a sub-score was obtained. Every non-`Computed` status carries a 0.0
/// score: a documented fallback, not a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Computed,
    /// One side had nothing to compare (empty text, or no usable tokens/vector).
    EmptyInput,
    /// The tokenizer or embedder was not configured.
    DependencyUnavailable,
    /// The embedder returned an error for one of the texts.
    EmbeddingFailed,
}

/// One sub-score with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub value: f64, // 0.0 – 100.0
    pub status: ScoreStatus,
}

impl SubScore {
    pub fn computed(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            status: ScoreStatus::Computed,
        }
    }

    pub fn fallback(status: ScoreStatus) -> Self {
        Self { value: 0.0, status }
    }
}

/// Result of scoring one (job description, résumé) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub keyword_score: f64,  // 0 – 100
    pub semantic_score: f64, // 0 – 100
    pub hybrid_score: f64,   // 0 – 100
    pub alpha: f64,
    pub keyword_status: ScoreStatus,
    pub semantic_status: ScoreStatus,
}

impl MatchScore {
    pub fn from_parts(keyword: SubScore, semantic: SubScore, alpha: f64) -> Self {
        Self {
            keyword_score: keyword.value,
            semantic_score: semantic.value,
            hybrid_score: combine(keyword.value, semantic.value, alpha),
            alpha,
            keyword_status: keyword.status,
            semantic_status: semantic.status,
        }
    }

    /// Hybrid score rounded to a whole percentage, as shown to users.
    pub fn overall_match(&self) -> u32 {
        self.hybrid_score.round() as u32
    }
}

/// `alpha * keyword + (1 - alpha) * semantic`, clamped to [0, 100].
pub fn combine(keyword: f64, semantic: f64, alpha: f64) -> f64 {
    (alpha * keyword + (1.0 - alpha) * semantic).clamp(0.0, 100.0)
}

/// One-line summary the prompt layer embeds verbatim.
impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} (Keyword Match: {:.2}, Semantic Similarity: {:.2})",
            self.hybrid_score, self.keyword_score, self.semantic_score
        )
    }
}
