pub mod config;
pub mod embedding;
pub mod llm;
pub mod source;
pub mod vector_index;

pub use config::{ChunkingConfig, Config, EmbeddingConfig, LlmConfig, RagConfig};
pub use embedding::GeminiEmbedding;
pub use llm::GeminiLlm;
pub use source::DirectorySource;
pub use vector_index::InMemoryVectorIndex;
