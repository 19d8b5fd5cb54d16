//! Source locations and spans for the parsed input tree
//!
//! Positions are line/column pairs rather than byte offsets: the input to
//! the transpiler is an already-parsed tree whose parser reports 1-based
//! lines and 0-based columns, and the only consumer of position data is the
//! line-number output annotation.

/// A single position in the source: 1-based line, 0-based column.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Default)]
pub struct Loc {
    /// 1-based source line.
    pub line: u32,
    /// 0-based column within the line.
    pub column: u32,
}

impl Loc {
    /// Creates a location from a line/column pair.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The source extent of one node.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Default)]
pub struct Span {
    /// First position covered by the node.
    pub start: Loc,
    /// Position one past the node's end.
    pub end: Loc,
}

impl Span {
    /// Creates a span from explicit endpoints.
    #[must_use]
    pub fn new(start: Loc, end: Loc) -> Self {
        Self { start, end }
    }

    /// Marks a whole line; the usual constructor for statement nodes, whose
    /// columns never influence the output.
    #[must_use]
    pub fn on_line(line: u32) -> Self {
        Self {
            start: Loc::new(line, 0),
            end: Loc::new(line, 0),
        }
    }

    /// The 1-based line the node starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.start.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_line_sets_both_endpoints() {
        let span = Span::on_line(7);
        assert_eq!(span.line(), 7);
        assert_eq!(span.start.line, span.end.line);
        assert_eq!(span.start.column, 0);
    }

    #[test]
    fn test_default_is_line_zero() {
        assert_eq!(Span::default().line(), 0);
    }
}
