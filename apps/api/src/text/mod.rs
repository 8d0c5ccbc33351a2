// Text pipeline: tokenization, light lemmatization, synonym expansion.
// Everything here is synchronous and shared read-only across requests.

pub mod lemma;
pub mod synonyms;
pub mod tokenizer;

pub use synonyms::{NoSynonyms, SynonymSource, VectorSynonyms, WordVectors};
pub use tokenizer::{DefaultTokenizer, Term, TokenSet, Tokenizer};
