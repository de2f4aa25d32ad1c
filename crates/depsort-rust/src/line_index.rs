//! Conversion between proc-macro2 line/column positions and byte offsets.

use proc_macro2::LineColumn;

/// Line start table for one source text.
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Byte offset of a position. Lines are 1-based, columns count chars.
    pub(crate) fn offset(&self, pos: LineColumn) -> usize {
        let Some(&start) = self.line_starts.get(pos.line.saturating_sub(1)) else {
            return self.text.len();
        };
        let line = self.line(pos.line);
        line.char_indices()
            .nth(pos.column)
            .map(|(b, _)| start + b)
            .unwrap_or(start + line.len())
    }

    /// Text of a 1-based line, without its newline.
    pub(crate) fn line(&self, line: usize) -> &'a str {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len());
        self.text[start..end].trim_end_matches('\r')
    }

    /// Offset of the first non-whitespace character of a 1-based line.
    pub(crate) fn first_non_blank(&self, line: usize) -> usize {
        let start = self.line_starts[line - 1];
        let text = self.line(line);
        start + (text.len() - text.trim_start().len())
    }
}
