//! Embedders: the `embed(text)` collaborator behind a trait.
//!
//! Default: `HashEmbedder` (local, deterministic, no model download).
//! Alternative: `RemoteEmbedder` (HTTP embedding service, e.g. a MiniLM server).
//!
//! The scorer holds an `Option<Arc<dyn Embedder>>`, built once at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod hash;
pub mod remote;

pub use hash::HashEmbedder;
pub use remote::RemoteEmbedder;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Embedding service returned no vectors")]
    EmptyResponse,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Fixed-length embedding. Two vectors are only comparable when produced by
/// the same embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn norm(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Unit-length copy. `None` for zero (or non-finite) vectors, which have no direction.
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        Some(Self(self.0.iter().map(|v| v / norm).collect()))
    }

    /// Euclidean distance, accumulated in f64. Errors on mismatched dimensions.
    pub fn l2_distance(&self, other: &Self) -> Result<f64, EmbedError> {
        if self.dimension() != other.dimension() {
            return Err(EmbedError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        Ok(self
            .0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| {
                let d = f64::from(a) - f64::from(b);
                d * d
            })
            .sum::<f64>()
            .sqrt())
    }
}

/// Text-to-vector seam. Implementations are shared read-only across requests.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend label for logs and health output.
    fn name(&self) -> &str;

    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError>;
}
