mod document_source;
mod embedding;
mod llm;
mod vector_index;

pub use document_source::DocumentSource;
pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use vector_index::VectorIndex;
