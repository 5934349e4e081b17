use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character '{}'", ch.escape_debug())
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize C source text into a sequence of tokens.
///
/// Whitespace is discarded. Keywords are matched as whole words only,
/// and two-character operators win over their one-character prefixes.
///
/// # Errors
///
/// Returns `LexError` on the first character that starts no token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).tokenize()?;
    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            source,
            input: bytes,
            pos: start,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let token = match ch {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                    continue;
                }
                b'&' if self.peek_at(1) == Some(b'&') => self.symbol(TokenKind::And, 2),
                b'|' if self.peek_at(1) == Some(b'|') => self.symbol(TokenKind::Or, 2),
                b'=' if self.peek_at(1) == Some(b'=') => self.symbol(TokenKind::Eq, 2),
                b'=' => self.symbol(TokenKind::Assign, 1),
                b'!' if self.peek_at(1) == Some(b'=') => self.symbol(TokenKind::Neq, 2),
                b'<' if self.peek_at(1) == Some(b'=') => self.symbol(TokenKind::Le, 2),
                b'>' if self.peek_at(1) == Some(b'=') => self.symbol(TokenKind::Ge, 2),
                b'<' => self.symbol(TokenKind::Lt, 1),
                b'>' => self.symbol(TokenKind::Gt, 1),
                b'0'..=b'9' => self.read_number(),
                b'+' | b'-' | b'*' | b'/' => self.symbol(TokenKind::Op, 1),
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.read_word(),
                b';' => self.symbol(TokenKind::Semi, 1),
                b'(' => self.symbol(TokenKind::LParen, 1),
                b')' => self.symbol(TokenKind::RParen, 1),
                b'{' => self.symbol(TokenKind::LCurly, 1),
                b'}' => self.symbol(TokenKind::RCurly, 1),
                b',' => self.symbol(TokenKind::Comma, 1),
                _ => return Err(self.unexpected()),
            };
            tracing::trace!(kind = ?token.kind, text = %token.text, "token");
            tokens.push(token);
        }

        Ok(tokens)
    }

    const fn span(&self) -> Span {
        Span {
            offset: self.pos,
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    /// Consume `len` ASCII bytes as one token.
    fn symbol(&mut self, kind: TokenKind, len: usize) -> Token {
        let span = self.span();
        let text = self.source[self.pos..self.pos + len].to_string();
        for _ in 0..len {
            self.advance();
        }
        Token { kind, text, span }
    }

    fn read_number(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        Token {
            kind: TokenKind::Number,
            text: self.source[start..self.pos].to_string(),
            span,
        }
    }

    fn read_word(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.advance();
        }
        let text = &self.source[start..self.pos];
        Token {
            kind: TokenKind::keyword(text).unwrap_or(TokenKind::Id),
            text: text.to_string(),
            span,
        }
    }

    fn unexpected(&self) -> LexError {
        // `pos` always sits on a char boundary: every token consumed so
        // far was ASCII.
        let ch = self.source[self.pos..].chars().next().unwrap_or('\u{FFFD}');
        LexError {
            kind: LexErrorKind::UnexpectedCharacter(ch),
            span: self.span(),
        }
    }
}
