use lexis_errors::Diagnostic;
use lexis_store::Ranged;
use text_size::{TextLen, TextRange};

use crate::SyntaxKind::{self, *};
use crate::cursor::Cursor;

/// A token or comment of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'text>(&self, text: &'text str) -> &'text str {
        &text[self.range]
    }
}

impl Ranged for Token {
    fn range(&self) -> TextRange {
        self.range
    }
}

pub struct Tokenizer<'text> {
    text: &'text str,
    cursor: Cursor<'text>,
    diagnostics: Vec<Diagnostic>,
}

impl<'text> Tokenizer<'text> {
    pub fn new(text: &'text str) -> Self {
        Self { text, cursor: Cursor::new(text), diagnostics: Vec::new() }
    }

    /// Lexical problems found so far.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn text(&self) -> &'text str {
        &self.text[self.cursor.token_range()]
    }

    fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(message, self.cursor.token_range()));
    }

    fn error_with_label(&mut self, message: &str, label: &str) {
        let diagnostic = Diagnostic::error(message, self.cursor.token_range()).with_label(label);
        self.diagnostics.push(diagnostic);
    }

    /// Next token or comment; whitespace is skipped. Returns `EOF` forever
    /// once the text is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.cursor.advance_while(char::is_whitespace);
        self.cursor.start_token();

        if self.cursor.is_eof() {
            return Token { kind: EOF, range: TextRange::empty(self.text.text_len()) };
        }

        let kind = match self.cursor.advance() {
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '=' => EQ,
            '.' => DOT,
            ',' => COMMA,
            '#' => {
                self.cursor.advance_while(|c| !matches!(c, '\n' | '\r'));
                COMMENT
            }
            '"' => self.basic_string(),
            '\'' => self.literal_string(),
            c if is_word_char(c) => self.word(),
            c => {
                self.error(format!("unexpected character `{}`", c.escape_debug()));
                UNKNOWN
            }
        };

        Token { kind, range: self.cursor.token_range() }
    }

    fn basic_string(&mut self) -> SyntaxKind {
        if self.cursor.at_str("\"\"") {
            self.cursor.advance_by(2);
            return self.multiline('"', MULTILINE_BASIC_STRING);
        }

        loop {
            match self.cursor.peek() {
                _ if self.cursor.is_eof() => break,
                '"' => {
                    self.cursor.advance();
                    return BASIC_STRING;
                }
                '\n' | '\r' => break,
                '\\' => {
                    self.cursor.advance();
                    if !matches!(self.cursor.peek(), '\n' | '\r') {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        self.error_with_label("unterminated string", "missing closing quote");
        BASIC_STRING
    }

    fn literal_string(&mut self) -> SyntaxKind {
        if self.cursor.at_str("''") {
            self.cursor.advance_by(2);
            return self.multiline('\'', MULTILINE_LITERAL_STRING);
        }

        self.cursor.advance_while(|c| !matches!(c, '\'' | '\n' | '\r'));
        if self.cursor.matches('\'') {
            self.cursor.advance();
        } else {
            self.error_with_label("unterminated string", "missing closing quote");
        }

        LITERAL_STRING
    }

    fn multiline(&mut self, quote: char, kind: SyntaxKind) -> SyntaxKind {
        let delimiter = if quote == '"' { "\"\"\"" } else { "'''" };

        while !self.cursor.is_eof() {
            if self.cursor.at_str(delimiter) {
                self.cursor.advance_by(3);
                // Up to two quotes of the same kind may sit right before the
                // closing delimiter, as in `""""`.
                for _ in 0..2 {
                    if self.cursor.at_str(delimiter) || !self.cursor.matches(quote) {
                        break;
                    }
                    self.cursor.advance();
                }
                return kind;
            }

            if self.cursor.advance() == '\\' && quote == '"' {
                self.cursor.advance();
            }
        }

        self.error_with_label("unterminated multi-line string", "missing closing delimiter");
        kind
    }

    fn word(&mut self) -> SyntaxKind {
        self.cursor.advance_while(is_word_char);

        if self.cursor.matches('.')
            && self.cursor.second().is_ascii_digit()
            && starts_numeric(self.text())
        {
            self.cursor.advance();
            self.cursor.advance_while(is_word_char);
        }

        classify_word(self.text())
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != EOF).then_some(token)
    }
}

/// Every token and comment of `text` in order, without the trailing `EOF`,
/// together with the lexical diagnostics.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(text);
    let tokens = tokenizer.by_ref().collect();
    (tokens, tokenizer.finish())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

fn starts_numeric(text: &str) -> bool {
    strip_sign(text).starts_with(|c: char| c.is_ascii_digit())
}

fn classify_word(text: &str) -> SyntaxKind {
    match text {
        "true" | "false" => BOOLEAN,
        _ if matches!(strip_sign(text), "inf" | "nan") => FLOAT,
        _ if is_integer(text) => INTEGER,
        _ if is_float(text) => FLOAT,
        _ => BARE,
    }
}

fn digits(text: &str, radix: u32) -> bool {
    text.starts_with(|c: char| c.is_digit(radix))
        && text.chars().all(|c| c == '_' || c.is_digit(radix))
}

fn is_integer(text: &str) -> bool {
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return digits(rest, radix);
        }
    }

    digits(strip_sign(text), 10)
}

fn is_float(text: &str) -> bool {
    let text = strip_sign(text);
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (text, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };

    if !digits(whole, 10) || fraction.is_some_and(|fraction| !digits(fraction, 10)) {
        return false;
    }

    match exponent {
        Some(exponent) => digits(strip_sign(exponent), 10),
        None => fraction.is_some(),
    }
}
