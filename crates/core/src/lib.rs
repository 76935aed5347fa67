pub mod chat;
pub mod chunking;
pub mod conversation;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod index;
pub mod ingest;
pub mod models;
pub mod session;

pub use chat::{ChatModel, HostedChatModel};
pub use chunking::{build_chunks, split_text};
pub use conversation::ConversationEngine;
pub use embeddings::{Embedder, NgramHashEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{ChatError, IngestError, SessionError};
pub use extractor::{extract_corpus_text, extract_document_text};
pub use index::{cosine_similarity, InMemoryIndex};
pub use ingest::{discover_pdf_files, load_pdf_upload, load_pdf_uploads};
pub use models::{
    ChatTurn, Chunk, ChunkingConfig, CorpusText, DocumentUpload, PageWarning, ProcessReport,
    Role, ScoredChunk, SessionOptions, DEFAULT_TOP_K,
};
pub use session::Session;
