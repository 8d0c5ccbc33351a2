// Match scoring: keyword overlap, embedding similarity, weighted blend.
// Tokenizer and embedder come in through traits; nothing here loads a model.

pub mod handlers;
pub mod hybrid;
pub mod keyword;
pub mod models;
pub mod semantic;
