//! Fixed-size text chunker.
//!
//! Splits extracted document text into [`Chunk`]s of at most `max_chars`
//! characters each. Windowing is purely positional: chunk `i` covers
//! character offsets `[i*max_chars, (i+1)*max_chars)` of the input, so a
//! chunk may split mid-word. That is a deliberate simplification of the
//! source system, not a defect to smooth over.
//!
//! # Guarantees
//!
//! - Deterministic: identical input always yields identical chunks.
//! - Lossless: concatenating chunk texts in ascending `chunk_id` order
//!   reproduces the input exactly.
//! - Non-overlapping, contiguous coverage; only the last chunk may be
//!   shorter than `max_chars`.
//! - Splits land on UTF-8 character boundaries by construction.
//! - Empty input yields an empty sequence.
//!
//! # Example
//!
//! ```rust
//! use askdoc_core::chunk::chunk_text;
//!
//! let chunks = chunk_text("The cat sat on the mat.", 500);
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].chunk_id, 0);
//! assert_eq!(chunks[0].text, "The cat sat on the mat.");
//! ```

use crate::models::Chunk;

/// Split `text` into fixed-size windows of at most `max_chars` characters.
///
/// Chunk ids are contiguous from 0 in source-text order. A `max_chars`
/// of zero is clamped to one rather than looping forever.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    let max_chars = max_chars.max(1);

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_window = 0;

    for (offset, _) in text.char_indices() {
        if in_window == max_chars {
            chunks.push(make_chunk(chunks.len() as i64, &text[start..offset]));
            start = offset;
            in_window = 0;
        }
        in_window += 1;
    }
    chunks.push(make_chunk(chunks.len() as i64, &text[start..]));

    chunks
}

fn make_chunk(chunk_id: i64, text: &str) -> Chunk {
    Chunk {
        chunk_id,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunk_text("The cat sat on the mat.", 500);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_id, 0);
        assert_eq!(chunks[0].text, "The cat sat on the mat.");
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500).is_empty());
    }

    #[test]
    fn test_exact_window_sizes() {
        let chunks = chunk_text("abcdefghij", 4);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_lossless_coverage_and_size_bound() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(40);
        let chunks = chunk_text(&text, 500);
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
        for c in &chunks {
            assert!(c.text.chars().count() <= 500);
        }
    }

    #[test]
    fn test_chunk_ids_contiguous() {
        let text = "x".repeat(2350);
        let chunks = chunk_text(&text, 500);
        assert_eq!(chunks.len(), 5);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_id, i as i64, "id mismatch at position {}", i);
        }
        assert_eq!(chunks[4].text.len(), 350);
    }

    #[test]
    fn test_multibyte_utf8_boundaries() {
        let text = "héllo wörld ünïcode tèxt ".repeat(30);
        let chunks = chunk_text(&text, 7);
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
        for c in &chunks {
            assert!(c.text.chars().count() <= 7);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "alpha beta gamma delta epsilon zeta";
        assert_eq!(chunk_text(text, 10), chunk_text(text, 10));
    }

    #[test]
    fn test_zero_max_chars_clamped() {
        let chunks = chunk_text("ab", 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a");
        assert_eq!(chunks[1].text, "b");
    }
}
