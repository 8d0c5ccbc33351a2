//! Turns raw text into a normalized `TokenSet`.
//!
//! Normalization: lowercase, split on anything that is not alphanumeric (keeping
//! `+` and `#` so "c++" and "c#" survive), drop stop words, then fold
//! inflections through `lemma::lemmatize`. Single letters stay: "C" and "R" are
//! skills.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::text::lemma::lemmatize;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "etc", "few", "for", "from", "further", "had", "has", "have",
        "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i",
        "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my",
        "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she", "should", "so",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "this", "those", "through", "t", "to", "too", "under",
        "until", "up", "us", "very", "via", "was", "we", "were", "what", "when", "where",
        "which", "while", "who", "whom", "why", "will", "with", "within", "would", "you",
        "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Ordered sequence of normalized tokens for one text. Duplicates are kept:
/// occurrence counts matter to the keyword matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IntoIterator for TokenSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// A token as written (lowercased) next to its normal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub surface: String,
    pub normal: String,
}

/// Tokenizer seam. Implement this to swap the normalization strategy (or stub
/// it in tests) without touching the scorers.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> TokenSet;

    /// Same tokens paired with their surface words, for lookups keyed by real
    /// words (word vectors). Tokenizers without a separate normal form reuse it.
    fn terms(&self, text: &str) -> Vec<Term> {
        self.tokenize(text)
            .into_iter()
            .map(|token| Term {
                surface: token.clone(),
                normal: token,
            })
            .collect()
    }
}

/// Built-in English tokenizer with stop-word removal and light lemmatization.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> TokenSet {
        TokenSet::new(self.terms(text).into_iter().map(|t| t.normal).collect())
    }

    fn terms(&self, text: &str) -> Vec<Term> {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .map(|raw| raw.trim_start_matches(['+', '#']))
            .filter(|raw| raw.chars().any(char::is_alphanumeric))
            .filter(|raw| !STOP_WORDS.contains(raw))
            .map(|raw| Term {
                surface: raw.to_string(),
                normal: lemmatize(raw),
            })
            .collect()
    }
}
