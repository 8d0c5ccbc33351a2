//! Semantic similarity scorer.
//!
//! Both vectors are explicitly unit-normalized, so their Euclidean distance lies
//! in [0, 2] whatever model produced them, and `d / √2` equals 1 for orthogonal
//! texts. `score = clamp(100 × (1 − d / √2), 0, 100)`.
//!
//! Empty text never reaches the embedder; it scores 0.0 as `EmptyInput`.

use std::f64::consts::SQRT_2;

use tracing::warn;

use crate::embedding::{EmbedError, Embedder, EmbeddingVector};
use crate::scoring::models::{ScoreStatus, SubScore};

pub async fn semantic_score(
    embedder: &dyn Embedder,
    job_description: &str,
    resume_text: &str,
) -> SubScore {
    if job_description.trim().is_empty() || resume_text.trim().is_empty() {
        return SubScore::fallback(ScoreStatus::EmptyInput);
    }

    let job = match embedder.embed(job_description).await {
        Ok(v) => v,
        Err(e) => return embedding_failed("job description", embedder, e),
    };
    let resume = match embedder.embed(resume_text).await {
        Ok(v) => v,
        Err(e) => return embedding_failed("résumé", embedder, e),
    };

    match similarity_score(&job, &resume) {
        Ok(Some(score)) => SubScore::computed(score),
        Ok(None) => SubScore::fallback(ScoreStatus::EmptyInput),
        Err(e) => embedding_failed("comparison", embedder, e),
    }
}

/// Distance-based similarity in [0, 100]. `Ok(None)` when either vector has
/// zero norm (nothing to compare).
pub fn similarity_score(
    a: &EmbeddingVector,
    b: &EmbeddingVector,
) -> Result<Option<f64>, EmbedError> {
    if a.dimension() != b.dimension() {
        return Err(EmbedError::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }
    let (Some(a), Some(b)) = (a.normalized(), b.normalized()) else {
        return Ok(None);
    };

    let distance = a.l2_distance(&b)?;
    let normalized_distance = distance / SQRT_2;
    Ok(Some((100.0 * (1.0 - normalized_distance)).clamp(0.0, 100.0)))
}

fn embedding_failed(stage: &str, embedder: &dyn Embedder, error: EmbedError) -> SubScore {
    warn!(
        "Embedding failed for {stage} via {} embedder: {error}; semantic score falls back to 0",
        embedder.name()
    );
    SubScore::fallback(ScoreStatus::EmbeddingFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// `[1, 0]` for any text containing "python", `[0, 1]` otherwise.
    struct PythonAxisEmbedder;

    #[async_trait]
    impl Embedder for PythonAxisEmbedder {
        fn name(&self) -> &str {
            "stub"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
            if text.to_lowercase().contains("python") {
                Ok(EmbeddingVector::new(vec![1.0, 0.0]))
            } else {
                Ok(EmbeddingVector::new(vec![0.0, 1.0]))
            }
        }
    }

    /// Fails for any text containing "boom".
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
            if text.contains("boom") {
                Err(EmbedError::EmptyResponse)
            } else {
                Ok(EmbeddingVector::new(vec![1.0, 0.0]))
            }
        }
    }

    #[tokio::test]
    async fn test_identical_vectors_score_exactly_100() {
        let s = semantic_score(&PythonAxisEmbedder, "python developer", "python python").await;
        assert_eq!(s.value, 100.0);
        assert_eq!(s.status, ScoreStatus::Computed);
    }

    #[tokio::test]
    async fn test_orthogonal_vectors_score_zero() {
        let s = semantic_score(&PythonAxisEmbedder, "python developer", "java developer").await;
        assert_eq!(s.value, 0.0);
        assert_eq!(s.status, ScoreStatus::Computed);
    }

    #[tokio::test]
    async fn test_empty_inputs_skip_the_embedder() {
        let s = semantic_score(&FailingEmbedder, "", "boom").await;
        assert_eq!(s, SubScore::fallback(ScoreStatus::EmptyInput));
        let s = semantic_score(&FailingEmbedder, "boom", "   ").await;
        assert_eq!(s, SubScore::fallback(ScoreStatus::EmptyInput));
    }

    #[tokio::test]
    async fn test_embedding_failure_falls_back_to_zero() {
        let s = semantic_score(&FailingEmbedder, "python", "boom").await;
        assert_eq!(s, SubScore::fallback(ScoreStatus::EmbeddingFailed));
    }

    #[test]
    fn test_similarity_is_scale_invariant() {
        let a = EmbeddingVector::new(vec![3.0, 4.0]);
        let b = EmbeddingVector::new(vec![0.3, 0.4]);
        let s = similarity_score(&a, &b).unwrap().unwrap();
        assert!((s - 100.0).abs() < 1e-4, "got {s}");
    }

    #[test]
    fn test_opposite_vectors_clamp_to_zero() {
        let a = EmbeddingVector::new(vec![1.0, 0.0]);
        let b = EmbeddingVector::new(vec![-1.0, 0.0]);
        assert_eq!(similarity_score(&a, &b).unwrap(), Some(0.0));
    }

    #[test]
    fn test_zero_vector_has_no_similarity() {
        let a = EmbeddingVector::zeros(2);
        let b = EmbeddingVector::new(vec![1.0, 0.0]);
        assert_eq!(similarity_score(&a, &b).unwrap(), None);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let a = EmbeddingVector::zeros(2);
        let b = EmbeddingVector::zeros(3);
        assert!(similarity_score(&a, &b).is_err());
    }

    #[test]
    fn test_range_over_many_angles() {
        let base = EmbeddingVector::new(vec![1.0, 0.0]);
        for step in 0..=36 {
            let theta = step as f32 * std::f32::consts::PI / 18.0;
            let other = EmbeddingVector::new(vec![theta.cos(), theta.sin()]);
            let s = similarity_score(&base, &other).unwrap().unwrap();
            assert!((0.0..=100.0).contains(&s), "theta={theta}: {s}");
        }
    }
}
