//! Character-offset view over a document
//!
//! The regex engine reports byte offsets while findings carry character
//! offsets. [`DocumentText`] converts between the two. ASCII documents map
//! one-to-one and skip the boundary table entirely.

use super::finding::Span;

/// Document text with byte/character offset conversion
#[derive(Debug)]
pub struct DocumentText<'a> {
    text: &'a str,
    /// Byte offset of every character start, plus `text.len()`; `None` for ASCII
    boundaries: Option<Vec<usize>>,
}

impl<'a> DocumentText<'a> {
    pub fn new(text: &'a str) -> Self {
        let boundaries = if text.is_ascii() {
            None
        } else {
            let mut table: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
            table.push(text.len());
            Some(table)
        };
        Self { text, boundaries }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        match &self.boundaries {
            None => self.text.len(),
            Some(table) => table.len() - 1,
        }
    }

    /// Character offset of a byte offset that lies on a char boundary
    pub fn char_offset(&self, byte: usize) -> usize {
        match &self.boundaries {
            None => byte,
            Some(table) => table.partition_point(|&b| b < byte),
        }
    }

    /// Byte offset of a character offset, `None` when out of bounds
    pub fn byte_offset(&self, char_idx: usize) -> Option<usize> {
        match &self.boundaries {
            None => (char_idx <= self.text.len()).then_some(char_idx),
            Some(table) => table.get(char_idx).copied(),
        }
    }

    /// Character span of a byte range reported by the regex engine
    pub fn span_of(&self, bytes: std::ops::Range<usize>) -> Span {
        Span::new(self.char_offset(bytes.start), self.char_offset(bytes.end))
    }

    /// Text of a character span, `None` when the span is out of bounds
    pub fn slice(&self, span: Span) -> Option<&'a str> {
        if span.start > span.end {
            return None;
        }
        let start = self.byte_offset(span.start)?;
        let end = self.byte_offset(span.end)?;
        self.text.get(start..end)
    }
}
