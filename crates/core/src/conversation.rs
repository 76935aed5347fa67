use crate::chat::ChatModel;
use crate::embeddings::{Embedder, NgramHashEmbedder};
use crate::error::ChatError;
use crate::index::InMemoryIndex;
use crate::models::{ChatTurn, Role};

/// Retrieval-augmented question answering over one processed corpus. The
/// history grows by one (user, assistant) pair per successful question; a
/// failed model call leaves it untouched.
pub struct ConversationEngine<M: ChatModel> {
    index: InMemoryIndex,
    model: M,
    embedder: NgramHashEmbedder,
    history: Vec<ChatTurn>,
    top_k: usize,
}

impl<M: ChatModel + Send + Sync> ConversationEngine<M> {
    pub fn new(index: InMemoryIndex, model: M, embedder: NgramHashEmbedder, top_k: usize) -> Self {
        Self {
            index,
            model,
            embedder,
            history: Vec::new(),
            top_k,
        }
    }

    pub async fn ask(&mut self, question: &str) -> Result<String, ChatError> {
        let query_vector = self.embedder.embed(question);
        let context: Vec<String> = self
            .index
            .search(&query_vector, self.top_k)
            .into_iter()
            .map(|hit| hit.chunk.text)
            .collect();

        let answer = self.model.complete(question, &context, &self.history).await?;

        self.history.push(ChatTurn {
            role: Role::User,
            content: question.to_string(),
        });
        self.history.push(ChatTurn {
            role: Role::Assistant,
            content: answer.clone(),
        });

        Ok(answer)
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}
