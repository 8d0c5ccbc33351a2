//! Lexical keyword matcher: what fraction of job-description concepts the
//! résumé mentions.
//!
//! Algorithm:
//! 1. Tokenize the job description; the expansion set is its tokens plus the
//!    synonyms of each (alphabetic, lower-case, not the word itself), each
//!    synonym normalized through the same tokenizer. Synonyms are looked up by
//!    the word as written, since a normal form ("manag") is rarely a word.
//! 2. Tokenize the résumé.
//! 3. match_count = résumé token occurrences found in the expansion set.
//! 4. score = match_count / |expansion| × 100, clamped to 100; 0.0 when the
//!    expansion set is empty.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::scoring::models::{ScoreStatus, SubScore};
use crate::text::{SynonymSource, Term, Tokenizer};

/// Job-description keywords plus their near-synonyms. Set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordExpansion {
    keywords: HashSet<String>,
}

impl KeywordExpansion {
    /// Returns `false` when the token was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.keywords.insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.keywords.contains(token)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

pub struct KeywordMatcher {
    tokenizer: Arc<dyn Tokenizer>,
    synonyms: Arc<dyn SynonymSource>,
}

impl KeywordMatcher {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, synonyms: Arc<dyn SynonymSource>) -> Self {
        Self {
            tokenizer,
            synonyms,
        }
    }

    pub fn expand(&self, job_terms: &[Term]) -> KeywordExpansion {
        let mut expansion = KeywordExpansion::default();
        let mut looked_up: HashSet<&str> = HashSet::new();

        for term in job_terms {
            expansion.insert(term.normal.as_str());
            // Repeated job words would only repeat the synonym scan.
            if !looked_up.insert(term.surface.as_str()) {
                continue;
            }
            for synonym in self.synonyms.synonyms(&term.surface) {
                if synonym == term.surface
                    || synonym == term.normal
                    || !synonym.chars().all(|c| c.is_alphabetic() && c.is_lowercase())
                {
                    continue;
                }
                for normalized in self.tokenizer.tokenize(&synonym) {
                    expansion.insert(normalized);
                }
            }
        }

        expansion
    }

    pub fn score(&self, job_description: &str, resume_text: &str) -> SubScore {
        let job_terms = self.tokenizer.terms(job_description);
        let expansion = self.expand(&job_terms);
        if expansion.is_empty() {
            return SubScore::fallback(ScoreStatus::EmptyInput);
        }

        let resume_tokens = self.tokenizer.tokenize(resume_text);
        if resume_tokens.is_empty() {
            return SubScore::fallback(ScoreStatus::EmptyInput);
        }

        let match_count = resume_tokens
            .iter()
            .filter(|token| expansion.contains(token))
            .count();

        debug!(
            "Keyword match: {match_count} résumé hits against {} expanded keywords ({} job tokens)",
            expansion.len(),
            job_terms.len()
        );

        SubScore::computed(match_count as f64 / expansion.len() as f64 * 100.0)
    }
}
