mod document;
mod embedding;
mod exchange;

pub use document::{Chunk, Document, SearchResult};
pub use embedding::Embedding;
pub use exchange::Exchange;
