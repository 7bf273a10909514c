use crate::domain::{errors::RagError, Chunk, Embedding, SearchResult};
use async_trait::async_trait;

/// Append-only similarity index over chunk embeddings.
///
/// The index is write-once per session: there is no delete or update, and
/// searching an empty index returns an empty result rather than an error.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn add(&self, chunk: Chunk, embedding: Embedding) -> Result<(), RagError>;
    async fn search(&self, query: &Embedding, top_k: usize) -> Result<Vec<SearchResult>, RagError>;
    async fn len(&self) -> Result<usize, RagError>;
}
