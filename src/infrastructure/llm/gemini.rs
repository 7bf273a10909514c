use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::gemini;

use crate::domain::{ports::LlmService, RagError};
use crate::infrastructure::config::LlmConfig;

/// Google completion provider. Reads `GEMINI_API_KEY` from the environment.
pub struct GeminiLlm {
    model: String,
}

impl GeminiLlm {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.model.clone())
    }

    pub fn default_model() -> Self {
        Self::new("gemini-2.5-flash")
    }
}

#[async_trait]
impl LlmService for GeminiLlm {
    async fn complete(&self, prompt: &str) -> Result<String, RagError> {
        let client = gemini::Client::from_env();
        let agent = client.agent(&self.model).build();
        agent
            .prompt(prompt)
            .await
            .map_err(|e| RagError::generation(e.to_string()))
    }
}
