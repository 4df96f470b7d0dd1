//! Fixed-size transcript chunking.
//!
//! Splits transcript text into overlapping character windows with stable
//! ordering. Chunking is deterministic: the same input always yields the
//! same chunks.

use crate::error::{Result, TubeqaError};
use serde::{Deserialize, Serialize};

/// A contiguous slice of transcript text, processed as one retrieval unit.
///
/// `start` and `end` are character offsets into the source text. Chunks are
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the transcript.
    pub index: usize,
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Text content.
    pub text: String,
}

impl Chunk {
    /// Number of characters in this chunk.
    pub fn char_count(&self) -> usize {
        self.end - self.start
    }
}

/// Split text into overlapping fixed-size chunks.
///
/// Walks the text with a window of `chunk_size` characters, advancing the
/// window start by `chunk_size - overlap` per step. The final chunk is
/// truncated to the remaining text; text shorter than `chunk_size` yields
/// exactly one chunk containing all of it.
///
/// Fails with `InvalidParameters` if `chunk_size` is zero or `overlap` is
/// not smaller than `chunk_size`.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(TubeqaError::InvalidParameters(
            "chunk_size must be greater than zero".to_string(),
        ));
    }
    if overlap >= chunk_size {
        return Err(TubeqaError::InvalidParameters(format!(
            "overlap ({}) must be smaller than chunk_size ({})",
            overlap, chunk_size
        )));
    }

    // Byte offset of every character boundary, including end of text, so
    // multi-byte text slices cleanly.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = boundaries.len() - 1;

    let step = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + chunk_size).min(total_chars);
        chunks.push(Chunk {
            index: chunks.len(),
            start,
            end,
            text: text[boundaries[start]..boundaries[end]].to_string(),
        });
        if end == total_chars {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
