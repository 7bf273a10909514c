use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded question/answer turn plus the document sources used to
/// answer it. Immutable after creation; owned by the conversation memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub user_input: String,
    pub ai_response: String,
    pub context_sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn new(
        user_input: impl Into<String>,
        ai_response: impl Into<String>,
        context_sources: Vec<String>,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            ai_response: ai_response.into(),
            context_sources,
            timestamp: Utc::now(),
        }
    }
}
