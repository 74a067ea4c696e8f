//! Whole-word, case-insensitive literal search
//!
//! Values are escaped before compilation so they match as exact text. The
//! `regex` crate guarantees linear-time matching, which bounds the work per
//! value even on crafted input.

use crate::domain::{DocumentText, Result, Span, XrefError};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Compiled-program ceiling for a single search value
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// Same notion of "word character" as the regex `\w` class, close enough for edges
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Search for one literal value
#[derive(Debug, Clone)]
pub struct LiteralSearch {
    regex: Regex,
    // Edges starting or ending in a non-word character, checked after matching
    guard_left: bool,
    guard_right: bool,
}

impl LiteralSearch {
    /// Compile a search for `value`
    ///
    /// Every match must stand on its own: a word character edge needs a word
    /// boundary, and a non-word edge must not touch a word character. So "Jan"
    /// never matches inside "Jansen" and "+31 6 12345678" matches after a
    /// space or ':' but not inside "x+31 6 12345678".
    pub fn new(value: &str, size_limit: usize) -> Result<Self> {
        let (Some(first), Some(last)) = (value.chars().next(), value.chars().last()) else {
            return Err(XrefError::Search("empty search value".to_string()));
        };

        let guard_left = !is_word_char(first);
        let guard_right = !is_word_char(last);
        let left = if guard_left { "" } else { r"\b" };
        let right = if guard_right { "" } else { r"\b" };
        let pattern = format!("{left}{}{right}", regex::escape(value));

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
            .map_err(|e| XrefError::Search(e.to_string()))?;

        Ok(Self {
            regex,
            guard_left,
            guard_right,
        })
    }

    /// Character spans of every non-overlapping match, left to right
    pub fn find_spans(&self, doc: &DocumentText<'_>) -> Vec<Span> {
        let text = doc.as_str();
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(m) = self.regex.find_at(text, pos) {
            if !m.is_empty() && self.is_isolated(text, m.range()) {
                spans.push(doc.span_of(m.range()));
                pos = m.end();
            } else {
                // Retry one character further so an overlapping match is not lost
                let step = text[m.start()..].chars().next().map_or(1, char::len_utf8);
                pos = m.start() + step;
            }
            if pos > text.len() {
                break;
            }
        }

        spans
    }

    fn is_isolated(&self, text: &str, range: Range<usize>) -> bool {
        let before_ok = !self.guard_left
            || !text[..range.start].chars().next_back().is_some_and(is_word_char);
        let after_ok =
            !self.guard_right || !text[range.end..].chars().next().is_some_and(is_word_char);
        before_ok && after_ok
    }
}
