//! Synonym expansion.
//!
//! `NoSynonyms` gives pure lemma matching. `VectorSynonyms` scans a word-vector
//! vocabulary for neighbours above a similarity threshold. The scan is linear
//! in the vocabulary, so vocabulary size and synonyms per word are capped, and
//! results sit in a bounded LRU cache.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use lru::LruCache;
use tracing::{debug, info};

pub trait SynonymSource: Send + Sync {
    /// Near-synonyms of `word`. Never includes `word` itself.
    fn synonyms(&self, word: &str) -> Vec<String>;
}

/// Disables expansion entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymSource for NoSynonyms {
    fn synonyms(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Word vectors
// ────────────────────────────────────────────────────────────────────────────

/// In-memory word-vector table. Vectors are unit-normalized on load so that
/// similarity is a plain dot product.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    words: Vec<String>,
    vectors: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl WordVectors {
    /// Loads a GloVe-style text file: one `word v1 v2 ... vn` entry per line.
    /// At most `limit` entries are read.
    pub fn load(path: impl AsRef<Path>, limit: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open word vectors at {}", path.display()))?;
        let vectors = Self::from_reader(BufReader::new(file), limit)?;
        info!(
            "Loaded {} word vectors from {}",
            vectors.len(),
            path.display()
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R, limit: usize) -> Result<Self> {
        let mut table = WordVectors::default();
        let mut dimension: Option<usize> = None;

        for (line_no, line) in reader.lines().enumerate() {
            if table.len() >= limit {
                break;
            }
            let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let values = parts
                .map(str::parse::<f32>)
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid vector component on line {}", line_no + 1))?;

            match dimension {
                None => dimension = Some(values.len()),
                Some(d) if d != values.len() => bail!(
                    "Line {} has {} components, expected {d}",
                    line_no + 1,
                    values.len()
                ),
                Some(_) => {}
            }
            table.insert(word, values);
        }

        Ok(table)
    }

    /// Adds one entry. Zero vectors and duplicate words are ignored.
    pub fn insert(&mut self, word: &str, values: Vec<f32>) {
        if self.index.contains_key(word) {
            return;
        }
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return;
        }
        self.index.insert(word.to_string(), self.words.len());
        self.words.push(word.to_string());
        self.vectors.push(values.into_iter().map(|v| v / norm).collect());
    }

    /// Cosine similarity between two words, `None` if either is out of vocabulary.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let a = self.vectors.get(*self.index.get(a)?)?;
        let b = self.vectors.get(*self.index.get(b)?)?;
        Some(dot(a, b))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

// ────────────────────────────────────────────────────────────────────────────
// VectorSynonyms
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SynonymConfig {
    /// Strict lower bound on similarity.
    pub threshold: f32,
    pub max_per_word: usize,
    /// Least recently used words are evicted past this many entries.
    pub cache_capacity: usize,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_per_word: 10,
            cache_capacity: 4096,
        }
    }
}

pub struct VectorSynonyms {
    vectors: WordVectors,
    config: SynonymConfig,
    cache: Mutex<LruCache<String, Vec<String>>>,
}

impl VectorSynonyms {
    pub fn new(vectors: WordVectors, config: SynonymConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            vectors,
            config,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn scan(&self, word: &str) -> Vec<String> {
        let Some(&query_idx) = self.vectors.index.get(word) else {
            return Vec::new();
        };
        let query = &self.vectors.vectors[query_idx];

        let mut candidates: Vec<(f32, &str)> = self
            .vectors
            .words
            .iter()
            .zip(&self.vectors.vectors)
            .filter(|(candidate, _)| candidate.as_str() != word)
            .filter(|(candidate, _)| candidate.chars().all(|c| c.is_alphabetic() && c.is_lowercase()))
            .map(|(candidate, vector)| (dot(query, vector), candidate.as_str()))
            .filter(|(similarity, _)| *similarity > self.config.threshold)
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
        candidates.truncate(self.config.max_per_word);
        candidates.into_iter().map(|(_, w)| w.to_string()).collect()
    }
}

impl SynonymSource for VectorSynonyms {
    fn synonyms(&self, word: &str) -> Vec<String> {
        if let Some(hit) = self
            .cache
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(word).cloned())
        {
            return hit;
        }

        let found = self.scan(word);
        debug!("Synonym scan for '{word}' found {} candidates", found.len());

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(word.to_string(), found.clone());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn table() -> WordVectors {
        let mut vectors = WordVectors::default();
        vectors.insert("manage", vec![1.0, 0.0, 0.0]);
        vectors.insert("oversee", vec![0.9, 0.1, 0.0]);
        vectors.insert("supervise", vec![0.8, 0.3, 0.0]);
        vectors.insert("Lead", vec![1.0, 0.0, 0.0]);
        vectors.insert("k8s", vec![1.0, 0.0, 0.0]);
        vectors.insert("banana", vec![0.0, 0.0, 1.0]);
        vectors
    }

    #[test]
    fn test_similarity_is_cosine() {
        let vectors = table();
        let s = vectors.similarity("manage", "manage").unwrap();
        assert!((s - 1.0).abs() < 1e-6);
        assert!(vectors.similarity("manage", "banana").unwrap().abs() < 1e-6);
        assert!(vectors.similarity("manage", "unknown").is_none());
    }

    #[test]
    fn test_synonyms_filter_threshold_case_and_self() {
        let synonyms = VectorSynonyms::new(table(), SynonymConfig::default());
        let found = synonyms.synonyms("manage");
        assert_eq!(found, vec!["oversee", "supervise"]);
    }

    #[test]
    fn test_synonyms_capped_per_word() {
        let config = SynonymConfig {
            max_per_word: 1,
            ..SynonymConfig::default()
        };
        let synonyms = VectorSynonyms::new(table(), config);
        assert_eq!(synonyms.synonyms("manage"), vec!["oversee"]);
    }

    #[test]
    fn test_out_of_vocabulary_has_no_synonyms() {
        let synonyms = VectorSynonyms::new(table(), SynonymConfig::default());
        assert!(synonyms.synonyms("kubernetes").is_empty());
    }

    #[test]
    fn test_cache_is_bounded() {
        let config = SynonymConfig {
            cache_capacity: 1,
            ..SynonymConfig::default()
        };
        let synonyms = VectorSynonyms::new(table(), config);
        synonyms.synonyms("manage");
        synonyms.synonyms("oversee");
        synonyms.synonyms("banana");
        assert_eq!(synonyms.cache.lock().unwrap().len(), 1);
        // cached and uncached lookups agree
        assert_eq!(synonyms.synonyms("manage"), vec!["oversee", "supervise"]);
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let config = SynonymConfig {
            cache_capacity: 2,
            ..SynonymConfig::default()
        };
        let synonyms = VectorSynonyms::new(table(), config);
        synonyms.synonyms("banana");
        synonyms.synonyms("manage");
        synonyms.synonyms("banana");
        synonyms.synonyms("oversee");

        let cache = synonyms.cache.lock().unwrap();
        assert!(cache.contains("banana"));
        assert!(cache.contains("oversee"));
        assert!(!cache.contains("manage"));
    }

    #[test]
    fn test_full_cache_still_admits_new_words() {
        let config = SynonymConfig {
            cache_capacity: 1,
            ..SynonymConfig::default()
        };
        let synonyms = VectorSynonyms::new(table(), config);
        synonyms.synonyms("banana");
        synonyms.synonyms("manage");
        assert!(synonyms.cache.lock().unwrap().contains("manage"));
    }

    #[test]
    fn test_zero_capacity_falls_back_to_one_entry() {
        let config = SynonymConfig {
            cache_capacity: 0,
            ..SynonymConfig::default()
        };
        let synonyms = VectorSynonyms::new(table(), config);
        synonyms.synonyms("manage");
        assert_eq!(synonyms.cache.lock().unwrap().cap().get(), 1);
    }

    #[test]
    fn test_from_reader_parses_and_limits() {
        let data = "rust 0.1 0.2\npython 0.3 0.4\ngo 0.5 0.6\n";
        let vectors = WordVectors::from_reader(Cursor::new(data), 2).unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.similarity("rust", "python").is_some());
        assert!(vectors.similarity("go", "rust").is_none());
    }

    #[test]
    fn test_from_reader_rejects_ragged_rows() {
        let data = "rust 0.1 0.2\npython 0.3\n";
        assert!(WordVectors::from_reader(Cursor::new(data), 10).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lead 1.0 0.0").unwrap();
        writeln!(file, "guide 0.9 0.2").unwrap();
        let vectors = WordVectors::load(file.path(), 100).unwrap();
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_no_synonyms_is_empty() {
        assert!(NoSynonyms.synonyms("manage").is_empty());
    }
}
