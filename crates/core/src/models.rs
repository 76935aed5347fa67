use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub id: Uuid,
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageWarning {
    pub document: String,
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct CorpusText {
    pub text: String,
    pub warnings: Vec<PageWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub chunk_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub documents: usize,
    pub chunks: usize,
    pub warnings: Vec<PageWarning>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub separator: char,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1_000,
            chunk_overlap: 200,
            separator: '\n',
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub chunking: ChunkingConfig,
    pub top_k: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}
