use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw text document as supplied by a document source.
///
/// Immutable once created. `source` is the identifier carried through to
/// chunks and, eventually, to the `context_sources` of recorded exchanges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub source: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A bounded-size slice of a document, the unit of retrieval.
///
/// Owned by the vector index after ingestion; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub source: String,
    pub content: String,
    /// Byte offset of this chunk within its source document.
    pub start_offset: usize,
}

impl Chunk {
    pub fn new(source: impl Into<String>, content: impl Into<String>, start_offset: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content: content.into(),
            start_offset,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub score: f32,
}
