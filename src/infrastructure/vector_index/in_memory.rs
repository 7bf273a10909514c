use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{ports::VectorIndex, Chunk, Embedding, RagError, SearchResult};

/// Linear-scan similarity index over in-memory chunk embeddings.
///
/// Adequate at a few thousand chunks; ranking uses a stable sort so equal
/// scores keep insertion order, earlier-inserted wins.
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<(Chunk, Embedding)>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn add(&self, chunk: Chunk, embedding: Embedding) -> Result<(), RagError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| RagError::internal(e.to_string()))?;

        entries.push((chunk, embedding));
        Ok(())
    }

    async fn search(&self, query: &Embedding, top_k: usize) -> Result<Vec<SearchResult>, RagError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RagError::internal(e.to_string()))?;

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        // stable sort: ties resolve to insertion order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(scored.into_iter().take(top_k).collect())
    }

    async fn len(&self) -> Result<usize, RagError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| RagError::internal(e.to_string()))?;
        Ok(entries.len())
    }
}
