use std::collections::{HashSet, VecDeque};

use crate::domain::Exchange;

/// How many exchanges the formatted transcript covers.
const CONTEXT_WINDOW: usize = 5;
/// How many exchanges topic keywords are drawn from.
const TOPIC_WINDOW: usize = 3;
/// Keywords must be longer than this many characters.
const MIN_TOPIC_LEN: usize = 4;

/// Bounded FIFO log of prior question/answer exchanges.
///
/// Capacity is fixed at construction; adding past capacity evicts the
/// oldest exchange first.
#[derive(Debug)]
pub struct ConversationMemory {
    max_history: usize,
    history: VecDeque<Exchange>,
}

impl ConversationMemory {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            history: VecDeque::with_capacity(max_history),
        }
    }

    pub fn add_exchange(
        &mut self,
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
        context_sources: Vec<String>,
    ) {
        self.history
            .push_back(Exchange::new(user_input, ai_response, context_sources));
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Formatted transcript of the last few exchanges, chronological,
    /// as alternating `User:` / `AI:` lines. Empty string on empty history.
    pub fn conversation_context(&self) -> String {
        if self.history.is_empty() {
            return String::new();
        }

        let skip = self.history.len().saturating_sub(CONTEXT_WINDOW);
        self.history
            .iter()
            .skip(skip)
            .flat_map(|exchange| {
                [
                    format!("User: {}", exchange.user_input),
                    format!("AI: {}", exchange.ai_response),
                ]
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Keywords from recent user inputs: lower-cased words longer than four
    /// characters, deduplicated, most recent exchange first.
    ///
    /// Naive by intent - no stopword filtering or stemming. A heuristic for
    /// biasing retrieval, not a guarantee of topical relevance.
    pub fn recent_topics(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for exchange in self.history.iter().rev().take(TOPIC_WINDOW) {
            for word in exchange.user_input.to_lowercase().split_whitespace() {
                if word.chars().count() > MIN_TOPIC_LEN && seen.insert(word.to_string()) {
                    topics.push(word.to_string());
                }
            }
        }

        topics
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_history
    }

    /// Ordered snapshot of the full history, oldest first.
    pub fn history(&self) -> Vec<Exchange> {
        self.history.iter().cloned().collect()
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> ConversationMemory {
        let mut memory = ConversationMemory::default();
        for i in 0..count {
            memory.add_exchange(format!("question {i}"), format!("answer {i}"), vec![]);
        }
        memory
    }

    #[test]
    fn test_capacity_invariant() {
        let memory = filled(12);
        assert_eq!(memory.len(), 10);
    }

    #[test]
    fn test_eviction_is_strict_fifo() {
        let memory = filled(12);
        let history = memory.history();

        let inputs: Vec<&str> = history.iter().map(|e| e.user_input.as_str()).collect();
        assert!(!inputs.contains(&"question 0"));
        assert!(!inputs.contains(&"question 1"));
        assert_eq!(inputs.first(), Some(&"question 2"));
        assert_eq!(inputs.last(), Some(&"question 11"));
    }

    #[test]
    fn test_context_empty_history() {
        let memory = ConversationMemory::default();
        assert_eq!(memory.conversation_context(), "");
    }

    #[test]
    fn test_context_windows_last_five() {
        let memory = filled(8);
        let context = memory.conversation_context();
        let lines: Vec<&str> = context.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "User: question 3");
        assert_eq!(lines[1], "AI: answer 3");
        assert_eq!(lines[8], "User: question 7");
        assert_eq!(lines[9], "AI: answer 7");
    }

    #[test]
    fn test_context_shorter_history() {
        let mut memory = ConversationMemory::default();
        memory.add_exchange("hello there", "hi", vec![]);
        assert_eq!(memory.conversation_context(), "User: hello there\nAI: hi");
    }

    #[test]
    fn test_recent_topics_filters_short_words() {
        let mut memory = ConversationMemory::default();
        memory.add_exchange("What color is the sky today", "Blue", vec![]);
        let topics = memory.recent_topics();

        assert!(topics.contains(&"color".to_string()));
        assert!(topics.contains(&"today".to_string()));
        assert!(!topics.contains(&"what".to_string()));
        assert!(!topics.contains(&"sky".to_string()));
    }

    #[test]
    fn test_recent_topics_most_recent_first_and_deduplicated() {
        let mut memory = ConversationMemory::default();
        memory.add_exchange("tell me about rustaceans", "ok", vec![]);
        memory.add_exchange("more about crustaceans please", "ok", vec![]);
        let topics = memory.recent_topics();

        assert_eq!(topics[0], "about");
        assert_eq!(topics[1], "crustaceans");
        assert_eq!(topics[2], "please");
        assert_eq!(topics[3], "rustaceans");
        assert_eq!(topics.iter().filter(|t| *t == "about").count(), 1);
    }

    #[test]
    fn test_recent_topics_only_last_three_exchanges() {
        let mut memory = ConversationMemory::default();
        memory.add_exchange("ancient history question", "ok", vec![]);
        for i in 0..3 {
            memory.add_exchange(format!("filler question number{i}"), "ok", vec![]);
        }
        let topics = memory.recent_topics();
        assert!(!topics.contains(&"ancient".to_string()));
    }

    #[test]
    fn test_clear_resets_history_not_capacity() {
        let mut memory = filled(5);
        memory.clear();

        assert!(memory.is_empty());
        assert_eq!(memory.conversation_context(), "");
        assert_eq!(memory.capacity(), 10);
    }
}
