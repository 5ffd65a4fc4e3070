//! Position tracking for diagnostics
//!
//! The CST works in byte offsets; diagnostics and parse errors report
//! 0-indexed line/column positions.

use text_size::TextSize;

/// A position in source code (0-indexed, column in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Editors count from one
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Line start table for offset to position conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = u32::from(offset - self.line_starts[line]) as usize;
        Position::new(line, column)
    }
}
