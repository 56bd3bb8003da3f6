//! SQL tokenizer implementation.

use crate::error::ParseError;

use super::{Keyword, Token, TokenKind, DELIMITERS};

/// A longest-match lexer over a SQL source string.
///
/// Whitespace, block comments (`/* ... */`, non-nesting) and line comments
/// (`-- ...`) are skipped between tokens. Every produced token carries the
/// character offset at which it began.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // Line comments (-- ... to newline or end of input)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance();
                self.advance();
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Block comments (/* ... */, not nesting)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token starting at the current token start.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.start)
    }

    /// Scans a word and classifies it as keyword or identifier.
    ///
    /// Words start with a letter and continue with letters, digits, and
    /// underscores. Keywords match case-insensitively; identifiers keep
    /// their original casing.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(String::from(text))),
        }
    }

    /// Scans an integer or decimal literal.
    ///
    /// A decimal requires digits on both sides of the point, so `3.` lexes
    /// as the integer `3` followed by a `.` delimiter.
    fn scan_number(&mut self) -> Result<Token, ParseError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let mut is_decimal = false;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_decimal = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        if is_decimal {
            let value = text
                .parse::<f64>()
                .map_err(|_| ParseError::new("decimal literal out of range", self.start))?;
            Ok(self.make_token(TokenKind::Decimal(value)))
        } else {
            let value = text
                .parse::<i64>()
                .map_err(|_| ParseError::new("integer literal out of range", self.start))?;
            Ok(self.make_token(TokenKind::Integer(value)))
        }
    }

    /// Scans a quoted run: a single-quoted string literal or double-quoted
    /// identifier. The content may not contain the quote character or a
    /// newline; hitting either end-of-line or end-of-input before the
    /// closing quote is an error.
    fn scan_quoted(&mut self, quote: char) -> Result<Token, ParseError> {
        self.advance(); // opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(c) if c == quote => break,
                Some('\n') | None => {
                    return Err(ParseError::new("unclosed string literal", self.start));
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let content = String::from(&self.input[content_start..self.pos]);
        self.advance(); // closing quote

        if quote == '\'' {
            Ok(self.make_token(TokenKind::String(content)))
        } else {
            Ok(self.make_token(TokenKind::Identifier(content)))
        }
    }

    /// Scans the longest matching delimiter.
    fn scan_delimiter(&mut self) -> Result<Token, ParseError> {
        let rest = &self.input[self.pos..];
        for delim in DELIMITERS {
            if rest.starts_with(delim) {
                self.pos += delim.len();
                return Ok(self.make_token(TokenKind::Delimiter(delim)));
            }
        }
        Err(ParseError::new("illegal character", self.pos))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for an illegal character, an unclosed string
    /// literal or quoted identifier, or an out-of-range numeric literal.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '\'' | '"' => self.scan_quoted(c),
            c if c.is_ascii_digit() => self.scan_number(),
            // Identifiers must start with a letter; a leading underscore is
            // the `_` delimiter instead.
            c if c.is_alphabetic() => Ok(self.scan_word()),
            _ => self.scan_delimiter(),
        }
    }

    /// Tokenizes the entire input, ending with an EOF token.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
