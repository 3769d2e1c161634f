//! Byte-offset to line/column decoding.
//!
//! Lines and columns are 1-based. Columns count bytes from the start of the line, matching the offsets the parser
//! records.

/// Decode a byte offset into `(line, column)`.
///
/// Offsets past the end of the text are clamped to its length, so a bogus span still yields a printable position.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

/// Return the text of a 1-based line, without its terminator.
pub fn line_text(source: &str, line: usize) -> Option<&str> {
    line.checked_sub(1).and_then(|idx| source.lines().nth(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let src = "local x = 1\nx = x + \"a\"\n";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 6), (1, 7));
        assert_eq!(line_col(src, 12), (2, 1));
        assert_eq!(line_col(src, 16), (2, 5));
    }

    #[test]
    fn test_line_col_clamps() {
        assert_eq!(line_col("ab\ncd", 999), (2, 3));
        assert_eq!(line_col("", 3), (1, 1));
    }

    #[test]
    fn test_line_text() {
        let src = "a\r\nbb\nccc";
        assert_eq!(line_text(src, 2), Some("bb"));
        assert_eq!(line_text(src, 1), Some("a"));
        assert_eq!(line_text(src, 0), None);
        assert_eq!(line_text(src, 4), None);
    }
}
