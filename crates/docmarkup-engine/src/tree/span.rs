use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the parsed markup text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Joins two spans when `next` starts exactly where `self` ends.
    #[must_use]
    pub fn join_adjacent(self, next: Span) -> Option<Span> {
        (self.end == next.start).then_some(Span::new(self.start, next.end))
    }
}

/// A 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

/// A `[start, end)` range of source locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

/// Maps byte offsets to line/column positions.
///
/// An empty index (see [`LineIndex::unavailable`]) describes a tree that was
/// not built from text; every lookup on it yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn location(&self, offset: usize) -> Option<SourceLocation> {
        if self.line_starts.is_empty() || offset > self.len {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        Some(SourceLocation {
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        })
    }

    pub fn range(&self, span: Span) -> Option<SourceRange> {
        Some(SourceRange {
            start: self.location(span.start)?,
            end: self.location(span.end)?,
        })
    }
}
