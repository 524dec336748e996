//! Escape token recognition.
//!
//! Only enough of the CSI and OSC grammar is understood to step over a
//! foreign sequence as one opaque, zero-width token:
//!
//! ```text
//! CSI   ESC [ ... m|H|J        ends at the first m, H or J (inclusive)
//! OSC   ESC ] ... BEL          ends at BEL or ESC \ (inclusive)
//! Lone  ESC                    no recognized introducer, one byte
//! ```
//!
//! A sequence that never terminates runs to the end of the input.

/// The escape byte.
pub const ESC: u8 = 0x1b;

/// The bell byte, one of the OSC terminators.
pub const BEL: u8 = 0x07;

/// Final bytes that end a CSI sequence.
const CSI_FINAL: &[u8] = b"mHJ";

/// Length of the escape token starting at `input[start]`, 0 if none.
pub fn token_len(input: &[u8], start: usize) -> usize {
    if input.get(start) != Some(&ESC) {
        return 0;
    }

    let body = start + 2;
    let end = match input.get(start + 1) {
        Some(b'[') => input[body..]
            .iter()
            .position(|b| CSI_FINAL.contains(b))
            .map_or(input.len(), |i| body + i + 1),
        Some(b']') => osc_end(input, body),
        // Lone escape: no recognized introducer.
        _ => start + 1,
    };

    end - start
}

/// Index one past the OSC terminator, scanning from `from`.
fn osc_end(input: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < input.len() {
        match input[i] {
            BEL => return i + 1,
            ESC if input.get(i + 1) == Some(&b'\\') => return i + 2,
            _ => i += 1,
        }
    }
    input.len()
}

/// A lexical unit of renderable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A whole escape token, zero columns wide.
    Escape(&'a [u8]),
    /// Any other byte, one column wide (line breaks included).
    Byte(u8),
}

/// Iterator splitting bytes into [`Token`]s.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Tokenize `input` from the start.
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.input.get(self.pos)?;
        let start = self.pos;
        match token_len(self.input, start) {
            0 => {
                self.pos += 1;
                Some(Token::Byte(byte))
            }
            len => {
                self.pos += len;
                Some(Token::Escape(&self.input[start..start + len]))
            }
        }
    }
}

/// Count the columns `input` occupies, ignoring escape tokens.
///
/// Every other byte counts as one column; line breaks are not special.
pub fn visible_width(input: &[u8]) -> usize {
    Tokens::new(input)
        .filter(|token| matches!(token, Token::Byte(_)))
        .count()
}
