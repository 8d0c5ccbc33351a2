use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::scoring::hybrid::DEFAULT_ALPHA;
use crate::text::synonyms::SynonymConfig;

/// Which embedding backend the semantic scorer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    /// Local feature-hashing embedder. No network, no model files.
    Hash,
    /// HTTP embedding service (`EMBEDDING_URL`).
    Remote,
    /// No embedder: semantic scores report `dependency_unavailable`.
    Disabled,
}

impl FromStr for EmbedderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "remote" => Ok(Self::Remote),
            "none" | "disabled" => Ok(Self::Disabled),
            other => bail!("EMBEDDER must be one of hash, remote, none; got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; every variable has a default except
/// `EMBEDDING_URL`, which `EMBEDDER=remote` requires.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub match_alpha: f64,
    pub embedder: EmbedderKind,
    pub embedding_dim: usize,
    pub embedding_url: Option<String>,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_timeout: Duration,
    pub word_vectors_path: Option<PathBuf>,
    pub synonym_vocab_limit: usize,
    pub synonyms: SynonymConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SynonymConfig::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            match_alpha: parse_or(&lookup, "MATCH_ALPHA", DEFAULT_ALPHA)?,
            embedder: parse_or(&lookup, "EMBEDDER", EmbedderKind::Hash)?,
            embedding_dim: parse_or(&lookup, "EMBEDDING_DIM", 384usize)?,
            embedding_url: non_empty(&lookup, "EMBEDDING_URL"),
            embedding_api_key: non_empty(&lookup, "EMBEDDING_API_KEY"),
            embedding_model: non_empty(&lookup, "EMBEDDING_MODEL")
                .unwrap_or_else(|| "all-MiniLM-L6-v2".to_string()),
            embedding_timeout: Duration::from_secs(parse_or(
                &lookup,
                "EMBEDDING_TIMEOUT_SECS",
                30u64,
            )?),
            word_vectors_path: non_empty(&lookup, "WORD_VECTORS_PATH").map(PathBuf::from),
            synonym_vocab_limit: parse_or(&lookup, "SYNONYM_VOCAB_LIMIT", 50_000usize)?,
            synonyms: SynonymConfig {
                threshold: parse_or(&lookup, "SYNONYM_THRESHOLD", defaults.threshold)?,
                max_per_word: parse_or(&lookup, "SYNONYM_MAX_PER_WORD", defaults.max_per_word)?,
                cache_capacity: parse_or(
                    &lookup,
                    "SYNONYM_CACHE_CAPACITY",
                    defaults.cache_capacity,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.match_alpha) {
            bail!("MATCH_ALPHA must be between 0 and 1, got {}", self.match_alpha);
        }
        if self.embedding_dim == 0 {
            bail!("EMBEDDING_DIM must be greater than 0");
        }
        if !(-1.0..=1.0).contains(&self.synonyms.threshold) {
            bail!(
                "SYNONYM_THRESHOLD must be a cosine similarity in [-1, 1], got {}",
                self.synonyms.threshold
            );
        }
        if self.embedder == EmbedderKind::Remote && self.embedding_url.is_none() {
            bail!("EMBEDDING_URL is required when EMBEDDER=remote");
        }
        Ok(())
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.match_alpha, 0.6);
        assert_eq!(config.embedder, EmbedderKind::Hash);
        assert_eq!(config.embedding_dim, 384);
        assert_eq!(config.embedding_model, "all-MiniLM-L6-v2");
        assert_eq!(config.embedding_timeout, Duration::from_secs(30));
        assert!(config.word_vectors_path.is_none());
        assert_eq!(config.synonym_vocab_limit, 50_000);
        assert_eq!(config.synonyms.threshold, 0.5);
        assert_eq!(config.synonyms.max_per_word, 10);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("MATCH_ALPHA", "0.25"),
            ("EMBEDDER", "Remote"),
            ("EMBEDDING_URL", "http://localhost:8000/embed"),
            ("WORD_VECTORS_PATH", "/data/glove.txt"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.match_alpha, 0.25);
        assert_eq!(config.embedder, EmbedderKind::Remote);
        assert_eq!(
            config.word_vectors_path,
            Some(PathBuf::from("/data/glove.txt"))
        );
    }

    #[test]
    fn test_embedder_none() {
        let config = config_from(&[("EMBEDDER", "none")]).unwrap();
        assert_eq!(config.embedder, EmbedderKind::Disabled);
    }

    #[test]
    fn test_rejects_alpha_out_of_range() {
        let err = config_from(&[("MATCH_ALPHA", "1.5")]).unwrap_err();
        assert!(err.to_string().contains("MATCH_ALPHA"));
    }

    #[test]
    fn test_rejects_unparseable_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_remote_requires_url() {
        let err = config_from(&[("EMBEDDER", "remote")]).unwrap_err();
        assert!(err.to_string().contains("EMBEDDING_URL"));
    }

    #[test]
    fn test_unknown_embedder_kind() {
        assert!(config_from(&[("EMBEDDER", "bert")]).is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(config_from(&[("EMBEDDING_DIM", "0")]).is_err());
    }
}
