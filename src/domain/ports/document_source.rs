use crate::domain::{errors::RagError, Document};
use async_trait::async_trait;

/// Supplies an ordered sequence of documents for ingestion.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Document>, RagError>;
}
