use std::str::Chars;

use text_size::{TextLen, TextRange, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'text> {
    chars: Chars<'text>,
    text_len: TextSize,
    token_start: TextSize,
}

impl<'text> Cursor<'text> {
    pub(crate) fn new(text: &'text str) -> Self {
        Self { chars: text.chars(), text_len: text.text_len(), token_start: 0.into() }
    }

    /// Offset of the next unread character.
    pub(crate) fn offset(&self) -> TextSize {
        self.text_len - self.chars.as_str().text_len()
    }

    /// Range from the start of the current token to the cursor.
    pub(crate) fn token_range(&self) -> TextRange {
        TextRange::new(self.token_start, self.offset())
    }

    pub(crate) fn start_token(&mut self) {
        self.token_start = self.offset();
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        self.chars.clone().nth(1).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        !self.is_eof() && self.peek() == c
    }

    /// True when the unread input starts with `prefix`.
    pub(crate) fn at_str(&self, prefix: &str) -> bool {
        self.chars.as_str().starts_with(prefix)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_range_tracks_multibyte_chars() {
        let mut cursor = Cursor::new("é = 1");
        cursor.start_token();
        assert_eq!(cursor.advance(), 'é');
        assert_eq!(cursor.token_range(), TextRange::new(0.into(), 2.into()));

        cursor.advance_while(char::is_whitespace);
        cursor.start_token();
        assert!(cursor.matches('='));
        assert_eq!(cursor.second(), ' ');
        assert_eq!(cursor.offset(), TextSize::new(3));
    }

    #[test]
    fn eof_is_not_a_nul_char() {
        let mut cursor = Cursor::new("\0");
        assert!(!cursor.is_eof());
        assert!(cursor.matches(EOF_CHAR));
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), EOF_CHAR);
    }
}
