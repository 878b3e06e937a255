//! Position conversion utilities.
//!
//! Tokens carry byte offsets. Editors want UTF-16 offsets or line/column
//! pairs, so diagnostics convert at output time.

/// Convert a byte offset to a UTF-16 offset.
///
/// # Arguments
/// * `source` - The source string
/// * `byte_offset` - The byte offset to convert
///
/// # Returns
/// The UTF-16 offset corresponding to the byte offset.
pub fn byte_to_utf16(source: &str, byte_offset: usize) -> usize {
    let byte_offset = byte_offset.min(source.len());
    source[..byte_offset].encode_utf16().count()
}

/// Convert a byte offset to a 0-indexed (line, column) pair. Columns count
/// characters, lines are split on `\n`.
pub fn line_col(source: &str, byte_offset: usize) -> (usize, usize) {
    let byte_offset = byte_offset.min(source.len());
    let before = &source[..byte_offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count())
}

/// Convert ascending byte offsets to (line, column) pairs, as [`line_col`]
/// does, in one forward pass over `source`.
pub fn line_cols(source: &str, offsets: &[usize]) -> Vec<(usize, usize)> {
    debug_assert!(offsets.is_sorted(), "offsets must be ascending");

    let mut positions = Vec::with_capacity(offsets.len());
    let mut chars = source.char_indices().peekable();
    let (mut line, mut col) = (0, 0);

    for &offset in offsets {
        while let Some(&(i, c)) = chars.peek() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
            chars.next();
        }
        positions.push((line, col));
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        let source = "hello world";
        assert_eq!(byte_to_utf16(source, 0), 0);
        assert_eq!(byte_to_utf16(source, 5), 5);
        assert_eq!(byte_to_utf16(source, 11), 11);
    }

    #[test]
    fn test_emoji() {
        let source = "hello 👋 world";
        // 👋 is 4 bytes but 2 UTF-16 code units
        assert_eq!(byte_to_utf16(source, 6), 6);
        assert_eq!(byte_to_utf16(source, 10), 8);
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(byte_to_utf16("hello", 100), 5);
        assert_eq!(line_col("hello", 100), (0, 5));
    }

    #[test]
    fn test_line_col() {
        let source = "<ul>\n  <li>café</li>\n</ul>";
        assert_eq!(line_col(source, 0), (0, 0));
        assert_eq!(line_col(source, 5), (1, 0));
        assert_eq!(line_col(source, 8), (1, 3));
        // "café" ends after the 2-byte é
        assert_eq!(line_col(source, 16), (1, 10));
        assert_eq!(line_col(source, 22), (2, 0));
    }

    #[test]
    fn test_line_cols_matches_line_col() {
        let source = "<ul>\n  <li>café</li>\n</ul>\n👋";
        let offsets = [0, 0, 5, 8, 16, 22, 27, 28, 32, 100];
        let expected: Vec<_> = offsets.iter().map(|&o| line_col(source, o)).collect();
        assert_eq!(line_cols(source, &offsets), expected);
    }
}
