pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

pub trait Embedder {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Deterministic local embedder: character trigrams hashed into a fixed
/// number of buckets, L2-normalized. Needs no model files or network.
#[derive(Debug, Clone, Copy)]
pub struct NgramHashEmbedder {
    pub dimensions: usize,
}

impl Default for NgramHashEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl Embedder for NgramHashEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let buckets = self.dimensions.max(1);
        let mut vector = vec![0f32; buckets];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        if chars.is_empty() {
            return vector;
        }

        if chars.len() < 3 {
            vector[(fnv1a(&lowered) % buckets as u64) as usize] += 1.0;
        } else {
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                vector[(fnv1a(&trigram) % buckets as u64) as usize] += 1.0;
            }
        }

        normalize(&mut vector);
        vector
    }
}

fn fnv1a(token: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn normalize(vector: &mut [f32]) {
    let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in vector {
            *value /= magnitude;
        }
    }
}
