use crate::application::ConversationMemory;

/// How many topic keywords may be appended to a question.
const MAX_TOPICS: usize = 3;

/// Biases retrieval toward ongoing conversation topics.
///
/// With a non-empty conversation, up to three recent topic keywords are
/// appended to the question, space-joined and most recent first (see
/// [`ConversationMemory::recent_topics`]). With no history the question
/// passes through unchanged.
pub fn enhance_query(question: &str, memory: &ConversationMemory) -> String {
    if memory.conversation_context().is_empty() {
        return question.to_string();
    }

    let topics = memory.recent_topics();
    if topics.is_empty() {
        return question.to_string();
    }

    let keep = topics.len().min(MAX_TOPICS);
    format!("{} {}", question, topics[..keep].join(" "))
}
