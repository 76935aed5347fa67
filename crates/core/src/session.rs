use crate::chat::ChatModel;
use crate::chunking::build_chunks;
use crate::conversation::ConversationEngine;
use crate::embeddings::NgramHashEmbedder;
use crate::error::{IngestError, SessionError};
use crate::extractor::extract_corpus_text;
use crate::index::InMemoryIndex;
use crate::models::{ChatTurn, DocumentUpload, ProcessReport, SessionOptions};
use chrono::Utc;

/// One interactive session: owns the current conversation engine, if any.
/// The engine exists exactly when `process` has succeeded since the last
/// `clear`; a failed `process` leaves the previous engine in place.
pub struct Session<M: ChatModel + Clone> {
    options: SessionOptions,
    embedder: NgramHashEmbedder,
    model: M,
    engine: Option<ConversationEngine<M>>,
}

impl<M: ChatModel + Clone + Send + Sync> Session<M> {
    pub fn new(model: M, options: SessionOptions) -> Self {
        Self {
            options,
            embedder: NgramHashEmbedder::default(),
            model,
            engine: None,
        }
    }

    pub fn process(
        &mut self,
        documents: &[DocumentUpload],
    ) -> Result<ProcessReport, SessionError> {
        if documents.is_empty() {
            return Err(SessionError::NoDocuments);
        }

        let corpus = extract_corpus_text(documents)?;
        if corpus.text.trim().is_empty() {
            return Err(IngestError::EmptyCorpus.into());
        }

        let chunks = build_chunks(&corpus.text, &self.options.chunking)?;
        let chunk_count = chunks.len();

        let index = InMemoryIndex::build(&self.embedder, chunks);
        self.engine = Some(ConversationEngine::new(
            index,
            self.model.clone(),
            self.embedder,
            self.options.top_k,
        ));

        Ok(ProcessReport {
            documents: documents.len(),
            chunks: chunk_count,
            warnings: corpus.warnings,
            processed_at: Utc::now(),
        })
    }

    pub async fn ask(&mut self, question: &str) -> Result<String, SessionError> {
        if question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let engine = self.engine.as_mut().ok_or(SessionError::NotReady)?;
        Ok(engine.ask(question).await?)
    }

    pub fn clear(&mut self) {
        self.engine = None;
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn history(&self) -> &[ChatTurn] {
        self.engine
            .as_ref()
            .map(|engine| engine.history())
            .unwrap_or(&[])
    }
}
