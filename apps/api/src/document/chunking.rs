//! Greedy, separator-aware text chunking with character overlap.
//!
//! The session reports how many chunks a résumé produces, but chunks are not
//! part of any prompt: every template embeds the full extracted text.

use serde::Serialize;

/// Chunking parameters. Sizes are in characters, not bytes.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub overlap: usize,
    pub separator: String,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
            separator: "\n".to_string(),
        }
    }
}

/// One chunk of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    pub text: String,
    /// Number of leading characters repeated from the previous chunk.
    pub overlap: usize,
}

/// Splits `text` into ordered chunks.
///
/// Separator-delimited units (separator kept attached) are accumulated until
/// the next unit would push the chunk past `chunk_size`. The next chunk then
/// starts with the trailing characters of the one just emitted, as many as
/// `overlap` allows while still leaving room for the incoming unit. A unit
/// longer than `chunk_size` becomes its own chunk and is never cut.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<TextChunk> {
    let mut chunks = Vec::new();

    // Byte range of the chunk being built, plus its length in chars.
    let mut start = 0usize;
    let mut end = 0usize;
    let mut len = 0usize;
    let mut carried = 0usize;
    let mut has_fresh = false;

    for unit in units(text, &config.separator) {
        let unit_len = unit.chars().count();

        if has_fresh && len + unit_len > config.chunk_size {
            chunks.push(TextChunk {
                text: text[start..end].to_string(),
                overlap: carried,
            });

            let carry = config
                .overlap
                .min(len)
                .min(config.chunk_size.saturating_sub(unit_len));
            start = byte_offset_of_tail(&text[start..end], carry) + start;
            len = carry;
            carried = carry;
        }

        end += unit.len();
        len += unit_len;
        has_fresh = true;
    }

    if has_fresh {
        chunks.push(TextChunk {
            text: text[start..end].to_string(),
            overlap: carried,
        });
    }

    chunks
}

/// Separator-delimited pieces of `text` that tile it exactly.
fn units<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(separator) {
        let cut = pos + separator.len();
        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// Byte offset inside `s` where its last `tail_chars` characters begin.
fn byte_offset_of_tail(s: &str, tail_chars: usize) -> usize {
    if tail_chars == 0 {
        return s.len();
    }
    s.char_indices()
        .rev()
        .nth(tail_chars - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}
