use super::prompts::{answer_messages, condense_question};
use super::splitter::TextSplitter;
use super::vector_store::{DEFAULT_TOP_K, VectorStore};
use super::{ChatModel, Embedder, LlmError, Message};

/// Multi-turn Q&A over one song's lyrics with buffer memory.
pub struct ChatSession<'a> {
    store: VectorStore,
    embedder: &'a dyn Embedder,
    llm: &'a dyn ChatModel,
    history: Vec<Message>,
    top_k: usize,
}

impl<'a> ChatSession<'a> {
    /// Chunk and index `lyrics`.
    pub async fn new(
        lyrics: &str,
        embedder: &'a dyn Embedder,
        llm: &'a dyn ChatModel,
    ) -> Result<Self, LlmError> {
        let chunks = TextSplitter::default().split(lyrics);
        let store = VectorStore::from_texts(chunks, embedder).await?;
        tracing::info!(
            "Chat session ready: {} chunks, model {}",
            store.len(),
            llm.model()
        );
        Ok(Self {
            store,
            embedder,
            llm,
            history: Vec::new(),
            top_k: DEFAULT_TOP_K,
        })
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Answer `question` in the context of the conversation so far.
    ///
    /// A follow-up is first rewritten into a standalone question; retrieval
    /// and answering use the rewritten form, memory keeps the original.
    pub async fn ask(&mut self, question: &str) -> Result<String, LlmError> {
        let standalone = if self.history.is_empty() {
            question.to_string()
        } else {
            let prompt = condense_question(&self.history, question);
            self.llm.complete(&[Message::user(prompt)]).await?
        };
        tracing::debug!("Standalone question: {}", standalone);

        let context = self
            .store
            .search(&standalone, self.top_k, self.embedder)
            .await?;
        let answer = self
            .llm
            .complete(&answer_messages(&context, &standalone))
            .await?;

        self.history.push(Message::user(question));
        self.history.push(Message::assistant(answer.clone()));
        Ok(answer)
    }
}
