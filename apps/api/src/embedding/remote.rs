//! Remote embedder: calls an OpenAI-compatible `/embeddings` endpoint.
//!
//! Works with hosted APIs and self-hosted sentence-transformer servers that
//! speak the same shape: request `{"model", "input"}`, response
//! `{"data": [{"embedding": [...]}]}`.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::{EmbedError, Embedder, EmbeddingVector};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct RemoteEmbedder {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    dimension: usize,
    backoff_base: Duration,
}

impl RemoteEmbedder {
    pub fn new(
        url: String,
        api_key: Option<String>,
        model: String,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build embedding HTTP client")?;

        Ok(Self {
            client,
            url,
            api_key,
            model,
            dimension,
            backoff_base: Duration::from_millis(1000),
        })
    }

    /// Shortens the retry backoff. Tests only need the retry count, not the wait.
    #[cfg(test)]
    fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Retries on 429 (rate limit) and 5xx with exponential backoff.
    async fn request(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let mut last_error: Option<EmbedError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, then 2s
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbedError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbedError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EmbedError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let text = response.text().await?;
            let vector = parse_embedding_response(&text, self.dimension)?;
            debug!(
                "Embedding call succeeded: model={}, dimension={}",
                self.model,
                vector.dimension()
            );
            return Ok(vector);
        }

        Err(last_error.unwrap_or(EmbedError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Embedder for RemoteEmbedder {
    fn name(&self) -> &str {
        "remote"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        self.request(text).await
    }
}

/// Takes the first vector of the response and checks its dimension.
fn parse_embedding_response(body: &str, expected: usize) -> Result<EmbeddingVector, EmbedError> {
    let response: EmbeddingResponse = serde_json::from_str(body)?;
    let data = response
        .data
        .into_iter()
        .next()
        .ok_or(EmbedError::EmptyResponse)?;

    if data.embedding.len() != expected {
        return Err(EmbedError::DimensionMismatch {
            expected,
            actual: data.embedding.len(),
        });
    }
    Ok(EmbeddingVector::new(data.embedding))
}
