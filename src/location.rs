//! Source locations and rendered excerpts for diagnostics.
//!
//! Every parser failure and every node recorded by the document assembler
//! carries a [`Region`]: a byte span plus the 1-based line and column of its
//! first character. Errors additionally carry a rendered excerpt of the
//! offending line with a caret under the reported column.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::Region;
//!
//! let src = "a = 1\nb = ?\n";
//! let region = Region::locate(src, 10, 1);
//! assert_eq!((region.line, region.column), (2, 5));
//! assert!(region.excerpt(src).contains("b = ?"));
//! ```

use std::fmt;
use std::sync::Arc;

/// A span of source text with its resolved line and column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Optional label of the input (usually a file name).
    pub source_name: Option<Arc<str>>,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length of the span in bytes.
    pub len: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Region {
    /// Resolves `offset` in `src` into a region of `len` bytes.
    ///
    /// Offsets past the end of the input are clamped to the end.
    #[must_use]
    pub fn locate(src: &str, offset: usize, len: usize) -> Self {
        let offset = clamp_to_boundary(src, offset);
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = src[line_start..offset].chars().count() + 1;
        Region {
            source_name: None,
            offset,
            len,
            line,
            column,
        }
    }

    /// Returns a copy of this region labelled with `name`.
    #[must_use]
    pub fn with_source_name(mut self, name: Option<Arc<str>>) -> Self {
        self.source_name = name;
        self
    }

    /// Byte offset one past the end of the span.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Renders the line containing this region with a caret marker.
    ///
    /// ```text
    ///   |
    /// 2 | b = ?
    ///   |     ^
    /// ```
    #[must_use]
    pub fn excerpt(&self, src: &str) -> String {
        let offset = clamp_to_boundary(src, self.offset);
        let line_start = src[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = src[offset..]
            .find('\n')
            .map_or(src.len(), |i| offset + i);
        let text = src[line_start..line_end].trim_end_matches('\r');

        let number = self.line.to_string();
        let gutter = " ".repeat(number.len());
        let marker_width = src[offset..line_end.max(offset)]
            .chars()
            .take(self.len.max(1))
            .count()
            .max(1);

        format!(
            "{gutter} |\n{number} | {text}\n{gutter} | {}{}",
            " ".repeat(self.column - 1),
            "^".repeat(marker_width)
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_name {
            Some(name) => write!(f, "{}:{}:{}", name, self.line, self.column),
            None => write!(f, "line {}, column {}", self.line, self.column),
        }
    }
}

fn clamp_to_boundary(src: &str, offset: usize) -> usize {
    let mut offset = offset.min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Line-start table for resolving many offsets against one input.
///
/// The assembler records a region for every statement; a binary search over
/// line starts keeps that linear in the number of statements.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    pub(crate) fn region(&self, src: &str, offset: usize, len: usize) -> Region {
        let offset = clamp_to_boundary(src, offset);
        let line_idx = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.starts[line_idx];
        Region {
            source_name: None,
            offset,
            len,
            line: line_idx + 1,
            column: src[line_start..offset].chars().count() + 1,
        }
    }
}

/// Describes what sits at `pos` for "expected X, found Y" messages.
pub(crate) fn describe(src: &str, pos: usize) -> String {
    let rest = match src.get(pos..) {
        Some(rest) => rest,
        None => return "end of input".to_string(),
    };
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some('\n') => "a newline".to_string(),
        Some('\r') if rest.starts_with("\r\n") => "a newline".to_string(),
        Some(' ') | Some('\t') => "whitespace".to_string(),
        Some('#') => "a comment".to_string(),
        Some(c) if c.is_control() => format!("control character U+{:04X}", c as u32),
        Some(_) => {
            let token: String = rest
                .chars()
                .take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ']' | '}' | '#'))
                .take(16)
                .collect();
            if token.is_empty() {
                format!("`{}`", &rest[..rest.chars().next().map_or(0, char::len_utf8)])
            } else {
                format!("`{}`", token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        let region = Region::locate("abc", 1, 1);
        assert_eq!(region.line, 1);
        assert_eq!(region.column, 2);
        assert_eq!(region.to_string(), "line 1, column 2");
    }

    #[test]
    fn test_locate_counts_chars_not_bytes() {
        let src = "k = \"é\" x";
        let region = Region::locate(src, src.find('x').unwrap(), 1);
        assert_eq!(region.column, 9);
    }

    #[test]
    fn test_line_index_agrees_with_locate() {
        let src = "a = 1\n\n[t]\nb = 2\n";
        let index = LineIndex::new(src);
        for offset in 0..src.len() {
            assert_eq!(index.region(src, offset, 1), Region::locate(src, offset, 1));
        }
    }

    #[test]
    fn test_excerpt_marks_column() {
        let src = "a = 1\nbad line\n";
        let region = Region::locate(src, 10, 4);
        let excerpt = region.excerpt(src);
        assert_eq!(excerpt, "  |\n2 | bad line\n  |     ^^^^");
    }

    #[test]
    fn test_display_with_source_name() {
        let region = Region::locate("x", 0, 1).with_source_name(Some("conf.toml".into()));
        assert_eq!(region.to_string(), "conf.toml:1:1");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("", 0), "end of input");
        assert_eq!(describe("\nx", 0), "a newline");
        assert_eq!(describe("abc def", 0), "`abc`");
        assert_eq!(describe("]", 0), "`]`");
    }
}
