//! Application layer - conversation state and the retrieve/generate pipeline.
//!
//! Services here orchestrate domain logic through the domain ports (traits)
//! rather than concrete providers.

pub mod memory;
pub mod pipeline;
pub mod query;

pub use memory::ConversationMemory;
pub use pipeline::{RagPipeline, RetrievalState};
pub use query::enhance_query;
