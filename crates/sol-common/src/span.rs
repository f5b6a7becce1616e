use std::ops::Range;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// Line/column positions are only computed when a diagnostic needs them,
/// via [`LineIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Zero-length span at `offset`.
    pub fn empty_at(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    /// The span as a `usize` range, the shape diagnostic renderers expect.
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Line start offsets of one source text, for offset -> (line, column).
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self { line_starts }
    }

    /// 1-based (line, column); the column counts bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(5, 10);
        assert_eq!(span.to_range(), 5..10);
        assert_eq!(Span::empty_at(3), Span::new(3, 3));
    }

    #[test]
    fn line_index_positions() {
        let idx = LineIndex::new("struct S {\n  uint x;\n}");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(10), (1, 11));
        assert_eq!(idx.line_col(13), (2, 3));
        assert_eq!(idx.line_col(21), (3, 1));
    }
}
