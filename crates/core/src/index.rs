use crate::embeddings::Embedder;
use crate::models::{Chunk, ScoredChunk};

struct IndexEntry {
    vector: Vec<f32>,
    chunk: Chunk,
}

/// Brute-force cosine similarity index over chunk embeddings. Rebuilt from
/// scratch on every processing run; there is no incremental update.
pub struct InMemoryIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl InMemoryIndex {
    pub fn build<E: Embedder>(embedder: &E, chunks: Vec<Chunk>) -> Self {
        let entries = chunks
            .into_iter()
            .map(|chunk| IndexEntry {
                vector: embedder.embed(&chunk.text),
                chunk,
            })
            .collect();

        Self {
            dimensions: embedder.dimensions(),
            entries,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search(&self, query_vector: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_vector, &entry.vector),
            })
            .collect();

        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        scored.truncate(top_k);
        scored
    }
}

pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    if left.len() != right.len() || left.is_empty() {
        return 0.0;
    }

    let dot: f32 = left.iter().zip(right.iter()).map(|(a, b)| a * b).sum();
    let magnitude_left: f32 = left.iter().map(|value| value * value).sum::<f32>().sqrt();
    let magnitude_right: f32 = right.iter().map(|value| value * value).sum::<f32>().sqrt();

    if magnitude_left < f32::EPSILON || magnitude_right < f32::EPSILON {
        0.0
    } else {
        dot / (magnitude_left * magnitude_right)
    }
}
