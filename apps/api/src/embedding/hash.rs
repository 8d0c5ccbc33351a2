//! Feature-hashing embedder.
//!
//! Each normalized token (and each adjacent token pair, at half weight) is
//! hashed into one of `dimension` slots with a hash-derived sign. The result is
//! L2-normalized, so distances fall in the same range as sentence-transformer
//! output. Deterministic across processes and platforms (xxh3, not SipHash).

use std::sync::Arc;

use async_trait::async_trait;
use xxhash_rust::xxh3::xxh3_64;

use crate::embedding::{EmbedError, Embedder, EmbeddingVector};
use crate::text::Tokenizer;

const BIGRAM_WEIGHT: f32 = 0.5;

pub struct HashEmbedder {
    dimension: usize,
    tokenizer: Arc<dyn Tokenizer>,
}

impl HashEmbedder {
    pub fn new(dimension: usize, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            dimension: dimension.max(1),
            tokenizer,
        }
    }

    /// Synchronous core, shared by the trait impl.
    pub fn embed_text(&self, text: &str) -> EmbeddingVector {
        let tokens: Vec<String> = self.tokenizer.tokenize(text).into_iter().collect();
        let mut values = vec![0.0_f32; self.dimension];

        for token in &tokens {
            self.accumulate(&mut values, token.as_bytes(), 1.0);
        }
        for pair in tokens.windows(2) {
            let joined = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut values, joined.as_bytes(), BIGRAM_WEIGHT);
        }

        let raw = EmbeddingVector::new(values);
        raw.normalized()
            .unwrap_or_else(|| EmbeddingVector::zeros(self.dimension))
    }

    fn accumulate(&self, values: &mut [f32], feature: &[u8], weight: f32) {
        let h = xxh3_64(feature);
        let slot = (h % self.dimension as u64) as usize;
        let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
        values[slot] += sign * weight;
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        Ok(self.embed_text(text))
    }
}
