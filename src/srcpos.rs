//! Source code positions
//!
//! Positions are `(line, column)` pairs, both 1-based.  Columns count source
//! bytes, so a tab occupies a single column.  Two positions form an inclusive
//! range; [`format_range`] renders a range the way diagnostics print it.

use std::fmt;

/// Position of a byte in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcPos {
    pub line: usize,
    pub col: usize,
}

impl SrcPos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Advance the position past one source byte.
    pub fn fwd(&mut self, b: u8) {
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

impl Default for SrcPos {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

impl fmt::Display for SrcPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Format an inclusive position range for a diagnostic.
///
/// A single position prints as `file:L:C`.  A range within one line prints as
/// `file:L:C1-C2`, a multi-line range as `file:L1:C1-L2:C2`.
pub fn format_range(fname: &str, bpos: SrcPos, epos: SrcPos) -> String {
    if bpos.line == epos.line && bpos.col == epos.col {
        format!("{}:{}:{}", fname, bpos.line, bpos.col)
    } else if bpos.line == epos.line {
        format!("{}:{}:{}-{}", fname, bpos.line, bpos.col, epos.col)
    } else {
        format!(
            "{}:{}:{}-{}:{}",
            fname, bpos.line, bpos.col, epos.line, epos.col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fwd_plain() {
        let mut pos = SrcPos::new(1, 1);
        pos.fwd(b'a');
        assert_eq!(pos, SrcPos::new(1, 2));
        pos.fwd(b'\t');
        assert_eq!(pos, SrcPos::new(1, 3));
    }

    #[test]
    fn test_fwd_newline() {
        let mut pos = SrcPos::new(2, 7);
        pos.fwd(b'\n');
        assert_eq!(pos, SrcPos::new(3, 1));
    }

    #[test]
    fn test_format_range_single() {
        let p = SrcPos::new(1, 12);
        assert_eq!(format_range("file", p, p), "file:1:12");
    }

    #[test]
    fn test_format_range_same_line() {
        let b = SrcPos::new(3, 4);
        let e = SrcPos::new(3, 9);
        assert_eq!(format_range("t.c", b, e), "t.c:3:4-9");
    }

    #[test]
    fn test_format_range_multi_line() {
        let b = SrcPos::new(1, 4);
        let e = SrcPos::new(2, 2);
        assert_eq!(format_range("t.c", b, e), "t.c:1:4-2:2");
    }
}
