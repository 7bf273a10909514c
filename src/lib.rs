//! Conversational retrieval-augmented question answering.
//!
//! Documents are chunked and embedded into an in-memory similarity index;
//! each question is enhanced with recent conversation topics, matched
//! against the index, and answered by a language model over the retrieved
//! context plus the conversation transcript.

pub mod application;
pub mod domain;
pub mod infrastructure;
