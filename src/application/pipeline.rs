use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::application::{enhance_query, ConversationMemory};
use crate::domain::{
    ports::{EmbeddingService, LlmService, VectorIndex},
    Document, Exchange, RagError, SearchResult, TextSplitter,
};

/// Transient per-question record, scoped to one pipeline invocation and
/// discarded once the exchange is recorded.
#[derive(Debug, Clone, Default)]
pub struct RetrievalState {
    pub question: String,
    pub enhanced_query: String,
    pub conversation_history: String,
    pub context: Vec<SearchResult>,
    pub answer: String,
}

/// Two-stage retrieval-augmented generation pipeline.
///
/// Each question runs retrieve then generate; only on success is the
/// exchange recorded into conversation memory, so every recorded exchange
/// corresponds to a successfully generated answer.
pub struct RagPipeline {
    embedding: Arc<dyn EmbeddingService>,
    llm: Arc<dyn LlmService>,
    index: Arc<dyn VectorIndex>,
    splitter: TextSplitter,
    memory: ConversationMemory,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            embedding,
            llm,
            index,
            splitter: TextSplitter::default(),
            memory: ConversationMemory::default(),
            top_k: 4,
        }
    }

    pub fn with_splitter(mut self, splitter: TextSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_memory_capacity(mut self, max_history: usize) -> Self {
        self.memory = ConversationMemory::new(max_history);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Chunks and indexes a batch of documents, returning the number of
    /// chunks stored.
    ///
    /// Best-effort over the batch: blank documents and documents whose
    /// embedding fails are skipped with a warning, not an error.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn ingest(&self, documents: Vec<Document>) -> Result<usize, RagError> {
        let jobs = documents.iter().filter_map(|doc| {
            if doc.is_blank() {
                debug!(source = %doc.source, "skipping blank document");
                None
            } else {
                Some(self.ingest_document(doc))
            }
        });

        let mut stored = 0;
        for outcome in join_all(jobs).await {
            match outcome {
                Ok(count) => stored += count,
                Err(e) => warn!(error = %e, "skipping document"),
            }
        }

        debug!(chunks = stored, "ingestion complete");
        Ok(stored)
    }

    async fn ingest_document(&self, doc: &Document) -> Result<usize, RagError> {
        let chunks = self.splitter.split_document(doc);
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::ingestion(format!(
                "embedding count mismatch for {}: {} chunks, {} vectors",
                doc.source,
                chunks.len(),
                embeddings.len()
            )));
        }

        let count = chunks.len();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            self.index.add(chunk, embedding).await?;
        }
        Ok(count)
    }

    /// Answers a question, recording the exchange on success.
    ///
    /// Never returns an error past this boundary: any retrieve or generate
    /// failure leaves conversation memory untouched and yields a
    /// user-facing error string instead of an answer.
    #[instrument(skip(self))]
    pub async fn ask(&mut self, question: &str) -> String {
        match self.run(question).await {
            Ok(state) => {
                let sources = state
                    .context
                    .iter()
                    .map(|r| r.chunk.source.clone())
                    .collect();
                self.memory
                    .add_exchange(&state.question, &state.answer, sources);
                state.answer
            }
            Err(e) => {
                warn!(error = %e, "question failed");
                format!("Sorry, I encountered an error: {e}")
            }
        }
    }

    async fn run(&self, question: &str) -> Result<RetrievalState, RagError> {
        let mut state = RetrievalState {
            question: question.to_string(),
            ..Default::default()
        };
        self.retrieve(&mut state).await?;
        self.generate(&mut state).await?;
        Ok(state)
    }

    async fn retrieve(&self, state: &mut RetrievalState) -> Result<(), RagError> {
        state.conversation_history = self.memory.conversation_context();
        state.enhanced_query = enhance_query(&state.question, &self.memory);

        let query = self.embedding.embed(&state.enhanced_query).await?;
        state.context = self.index.search(&query, self.top_k).await?;

        debug!(
            retrieved = state.context.len(),
            enhanced = %state.enhanced_query,
            "retrieve stage done"
        );
        Ok(())
    }

    async fn generate(&self, state: &mut RetrievalState) -> Result<(), RagError> {
        let docs_content = state
            .context
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = build_prompt(&state.conversation_history, &docs_content, &state.question);
        state.answer = self.llm.complete(&prompt).await?;
        Ok(())
    }

    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }

    pub fn history(&self) -> Vec<Exchange> {
        self.memory.history()
    }

    pub async fn indexed_chunks(&self) -> Result<usize, RagError> {
        self.index.len().await
    }
}

fn build_prompt(conversation_history: &str, context: &str, question: &str) -> String {
    format!(
        "You are a helpful AI assistant that answers questions based on the provided context and conversation history.\n\
         \n\
         Previous Conversation:\n\
         {conversation_history}\n\
         \n\
         Context from documents:\n\
         {context}\n\
         \n\
         Current Question: {question}\n\
         \n\
         Instructions:\n\
         1. Use the provided context to answer the question accurately\n\
         2. Consider the conversation history to maintain context\n\
         3. If the question relates to previous conversation, reference it appropriately\n\
         4. If you cannot find the answer in the context, say so politely\n\
         5. Keep responses concise but informative\n\
         6. Be conversational and friendly\n\
         \n\
         Answer:"
    )
}
