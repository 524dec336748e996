//! Escape-Aware Line Wrapper: split text into rows of bounded visible width.
//!
//! Wrapping runs in two passes over the same input. The sizing pass counts
//! the rows so the line collection is allocated once up front; the filling
//! pass copies bytes into the rows. Both passes are driven by the same
//! [`LineBreaker`], so they always agree on where rows end.
//!
//! Escape tokens are copied whole into the current row and never count
//! against the width, so a sequence sitting exactly on a wrap boundary
//! stays on the row it follows.

use super::escape::{Token, Tokens};
use crate::buffer::TextBuffer;
use crate::error::Result;

/// Visible columns per wrapped row, independent of the terminal width.
pub const TEXT_WIDTH: usize = 80;

/// What the wrapper does with one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement<'a> {
    /// Copy an escape token into the current row.
    Escape(&'a [u8]),
    /// Copy a visible byte into the current row.
    Visible(u8),
    /// A line break: start a new row, copy nothing.
    Break,
    /// The row is full: start a new row holding this byte.
    Overflow(u8),
}

/// Tracks the visible column and decides where each token goes.
#[derive(Debug, Clone, Copy)]
struct LineBreaker {
    width: usize,
    column: usize,
}

impl LineBreaker {
    const fn new(width: usize) -> Self {
        Self { width, column: 0 }
    }

    fn place<'a>(&mut self, token: Token<'a>) -> Placement<'a> {
        match token {
            Token::Escape(sequence) => Placement::Escape(sequence),
            Token::Byte(b'\n') => {
                self.column = 0;
                Placement::Break
            }
            Token::Byte(byte) if self.column >= self.width => {
                self.column = 1;
                Placement::Overflow(byte)
            }
            Token::Byte(byte) => {
                self.column += 1;
                Placement::Visible(byte)
            }
        }
    }
}

/// Count the rows `input` wraps into at `width` columns.
///
/// Always at least one: empty input is a single empty row.
pub fn count_lines(input: &[u8], width: usize) -> usize {
    let mut breaker = LineBreaker::new(width);
    1 + Tokens::new(input)
        .map(|token| breaker.place(token))
        .filter(|placement| matches!(placement, Placement::Break | Placement::Overflow(_)))
        .count()
}

/// Wrap `input` into rows of at most `width` visible columns.
///
/// Line breaks are consumed; a trailing line break yields a trailing
/// empty row.
pub fn wrap_lines(input: &[u8], width: usize) -> Result<Vec<TextBuffer>> {
    let expected = count_lines(input, width);

    let mut lines = Vec::new();
    lines.try_reserve_exact(expected)?;

    let mut breaker = LineBreaker::new(width);
    let mut current = TextBuffer::new();
    for token in Tokens::new(input) {
        match breaker.place(token) {
            Placement::Escape(sequence) => {
                current.append(sequence)?;
            }
            Placement::Visible(byte) => {
                current.append_char(byte)?;
            }
            Placement::Break | Placement::Overflow(_) if lines.len() + 1 >= expected => {
                // Never grow past the row count the sizing pass allocated.
                break;
            }
            Placement::Break => {
                lines.push(std::mem::take(&mut current));
            }
            Placement::Overflow(byte) => {
                lines.push(std::mem::take(&mut current));
                current.append_char(byte)?;
            }
        }
    }
    lines.push(current);

    Ok(lines)
}

/// Wrap a buffer at the standard [`TEXT_WIDTH`].
pub fn wrap(input: &TextBuffer) -> Result<Vec<TextBuffer>> {
    wrap_lines(input.as_bytes(), TEXT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::escape::visible_width;
    use proptest::prelude::*;

    fn wrapped(input: &[u8]) -> Vec<Vec<u8>> {
        wrap_lines(input, TEXT_WIDTH)
            .unwrap()
            .iter()
            .map(|line| line.as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn test_wrap_empty_is_one_line() {
        assert_eq!(wrapped(b""), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_wrap_exact_width_is_one_line() {
        let lines = wrapped(&[b'a'; 80]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 80);
    }

    #[test]
    fn test_wrap_overflow_starts_next_line() {
        let lines = wrapped(&[b'a'; 81]);
        assert_eq!(lines, vec![vec![b'a'; 80], vec![b'a']]);
    }

    #[test]
    fn test_wrap_keeps_every_byte_across_many_rows() {
        let lines = wrapped(&[b'a'; 161]);
        let lengths: Vec<_> = lines.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![80, 80, 1]);
    }

    #[test]
    fn test_wrap_trailing_line_break() {
        assert_eq!(wrapped(b"hello\n"), vec![b"hello".to_vec(), Vec::new()]);
        assert_eq!(wrapped(b"\n"), vec![Vec::new(), Vec::new()]);
    }

    #[test]
    fn test_wrap_line_break_at_width_breaks_once() {
        let mut input = vec![b'a'; 80];
        input.extend_from_slice(b"\nb");
        assert_eq!(wrapped(&input), vec![vec![b'a'; 80], b"b".to_vec()]);
    }

    #[test]
    fn test_wrap_escape_is_zero_width() {
        let mut input = vec![b'a'; 40];
        input.extend_from_slice(b"\x1b[31m");
        input.extend_from_slice(&[b'a'; 40]);
        let lines = wrapped(&input);
        assert_eq!(lines, vec![input.clone()]);

        input.push(b'b');
        let lines = wrapped(&input);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], b"b");
        assert_eq!(visible_width(&lines[0]), 80);
    }

    #[test]
    fn test_wrap_escape_on_boundary_stays_with_row() {
        let mut input = vec![b'a'; 80];
        input.extend_from_slice(b"\x1b[0mb");
        let lines = wrapped(&input);
        assert!(lines[0].ends_with(b"\x1b[0m"));
        assert_eq!(lines[1], b"b");
    }

    #[test]
    fn test_wrap_heading_sequence_is_not_split() {
        let mut input = vec![b'x'; 79];
        input.extend_from_slice(b"\x1b]66;s=3;A long heading that is wider than the rest\x07yz");
        let lines = wrapped(&input);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(b"rest\x07y"));
        assert_eq!(lines[1], b"z");
    }

    #[test]
    fn test_wrap_unterminated_escape_is_kept() {
        let input = b"ab\x1b]66;s=1;never ends";
        assert_eq!(wrapped(input), vec![input.to_vec()]);
    }

    #[test]
    fn test_count_lines_matches_wrap() {
        let input = b"one\ntwo\n\nthree";
        assert_eq!(count_lines(input, TEXT_WIDTH), 4);
        assert_eq!(wrapped(input).len(), 4);
    }

    #[test]
    fn test_wrap_narrow_width() {
        let lines = wrap_lines(b"abcdefg", 3).unwrap();
        let lines: Vec<_> = lines.iter().map(TextBuffer::as_bytes).collect();
        assert_eq!(lines, vec![&b"abc"[..], &b"def"[..], &b"g"[..]]);
    }

    proptest! {
        #[test]
        fn prop_rows_fit_and_keep_bytes(
            input in prop::collection::vec(
                prop_oneof![
                    Just(b"\x1b[1m".to_vec()),
                    Just(b"\x1b]66;s=2;head\x07".to_vec()),
                    Just(b"\n".to_vec()),
                    prop::collection::vec(b'a'..=b'z', 1..120),
                ],
                0..30,
            ).prop_map(|parts| parts.concat())
        ) {
            let lines = wrap_lines(&input, TEXT_WIDTH).unwrap();
            prop_assert_eq!(lines.len(), count_lines(&input, TEXT_WIDTH));

            for line in &lines {
                prop_assert!(visible_width(line.as_bytes()) <= TEXT_WIDTH);
            }

            let joined: Vec<u8> = lines.iter().flat_map(|l| l.as_bytes().to_vec()).collect();
            let expected: Vec<u8> = input.iter().copied().filter(|&b| b != b'\n').collect();
            prop_assert_eq!(joined, expected);
        }
    }
}
