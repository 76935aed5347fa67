use crate::error::IngestError;
use crate::models::{Chunk, ChunkingConfig};
use sha2::{Digest, Sha256};

/// Splits text into overlapping fixed-size segments. The window is cut at the
/// last separator inside it when that still advances the cursor past the
/// overlap region; otherwise it is cut at the size limit. Each segment after
/// the first starts `chunk_overlap` characters before the previous cut, so
/// stripping the overlap from every segment but the first reconstructs the
/// input.
pub fn split_text(text: &str, config: &ChunkingConfig) -> Result<Vec<String>, IngestError> {
    if config.chunk_size == 0 {
        return Err(IngestError::InvalidChunkConfig(
            "chunk_size must be greater than zero".to_string(),
        ));
    }
    if config.chunk_overlap >= config.chunk_size {
        return Err(IngestError::InvalidChunkConfig(format!(
            "chunk_overlap {} must be smaller than chunk_size {}",
            config.chunk_overlap, config.chunk_size
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut start = 0;

    loop {
        let hard_end = (start + config.chunk_size).min(chars.len());
        let end = if hard_end < chars.len() {
            separator_cut(&chars, start, hard_end, config)
        } else {
            hard_end
        };

        segments.push(chars[start..end].iter().collect());

        if end == chars.len() {
            break;
        }
        start = end - config.chunk_overlap;
    }

    Ok(segments)
}

fn separator_cut(chars: &[char], start: usize, hard_end: usize, config: &ChunkingConfig) -> usize {
    for offset in (start..hard_end).rev() {
        if chars[offset] == config.separator {
            let candidate = offset + 1;
            if candidate > start + config.chunk_overlap {
                return candidate;
            }
            break;
        }
    }
    hard_end
}

pub fn build_chunks(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, IngestError> {
    let segments = split_text(text, config)?;

    Ok(segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| Chunk {
            chunk_id: make_chunk_id(index, &segment),
            chunk_index: index,
            text: segment,
        })
        .collect())
}

fn make_chunk_id(index: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((index as u64).to_le_bytes());
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{build_chunks, split_text};
    use crate::error::IngestError;
    use crate::models::ChunkingConfig;

    fn config(chunk_size: usize, chunk_overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            chunk_overlap,
            separator: '\n',
        }
    }

    #[test]
    fn separator_free_text_splits_at_fixed_offsets() {
        let text = "a".repeat(2_500);
        let segments = split_text(&text, &config(1_000, 200)).expect("config is valid");

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], text[0..1_000]);
        assert_eq!(segments[1], text[800..1_800]);
        assert_eq!(segments[2], text[1_600..2_500]);
    }

    #[test]
    fn overlap_removal_reconstructs_the_input() {
        let text: String = (0..3_000)
            .map(|index| char::from(b'a' + (index % 17) as u8))
            .collect();
        let overlap = 200;
        let segments = split_text(&text, &config(1_000, overlap)).expect("config is valid");

        let mut rebuilt = segments[0].clone();
        for segment in &segments[1..] {
            rebuilt.push_str(&segment.chars().skip(overlap).collect::<String>());
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn no_segment_exceeds_the_configured_size() {
        let text = "line one\nline two\nline three\n".repeat(120);
        let segments = split_text(&text, &config(100, 20)).expect("config is valid");

        assert!(!segments.is_empty());
        for segment in &segments {
            assert!(segment.chars().count() <= 100);
        }
    }

    #[test]
    fn split_prefers_the_separator() {
        let mut text = "x".repeat(60);
        text.push('\n');
        text.push_str(&"y".repeat(60));
        let segments = split_text(&text, &config(100, 10)).expect("config is valid");

        assert!(segments[0].ends_with('\n'));
        assert_eq!(segments[0].len(), 61);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "The quick brown fox\njumps over the lazy dog. ".repeat(80);
        let first = split_text(&text, &config(300, 50)).expect("config is valid");
        let second = split_text(&text, &config(300, 50)).expect("config is valid");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_produces_no_chunks() {
        let segments = split_text("", &config(1_000, 200)).expect("config is valid");
        assert!(segments.is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let segments = split_text("short", &config(1_000, 200)).expect("config is valid");
        assert_eq!(segments, vec!["short".to_string()]);
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        let result = split_text("abc", &config(100, 100));
        assert!(matches!(result, Err(IngestError::InvalidChunkConfig(_))));

        let result = split_text("abc", &config(0, 0));
        assert!(matches!(result, Err(IngestError::InvalidChunkConfig(_))));
    }

    #[test]
    fn chunk_ids_are_stable_and_ordered() {
        let text = "b".repeat(1_500);
        let first = build_chunks(&text, &config(1_000, 200)).expect("config is valid");
        let second = build_chunks(&text, &config(1_000, 200)).expect("config is valid");

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].chunk_index, 0);
        assert_eq!(first[1].chunk_index, 1);
        assert_eq!(first[0].chunk_id, second[0].chunk_id);
        assert_ne!(first[0].chunk_id, first[1].chunk_id);
    }
}
