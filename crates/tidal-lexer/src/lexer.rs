//! Core tidal lexer — converts template source into a token stream.
//!
//! The lexer tracks a bracket mode: plain text, inside `{{ }}`, or inside
//! `{% %}`. Opening brackets are recognised through two-character
//! lookahead and switch the mode; the active mode selects which token
//! grammar applies. Input is pulled through [`SourceReader`], so the full
//! template never has to be resident in memory.

use std::io::Read;

use tidal_types::Span;

use crate::error::LexError;
use crate::reader::SourceReader;
use crate::token::{Token, TokenKind};

/// Lexical mode — which bracket context the lexer is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Plain template text.
    Text,
    /// Inside `{{ … }}`.
    Object,
    /// Inside `{% … %}`.
    Tag,
}

/// The tidal lexer.
///
/// Converts template source into a vector of [`Token`]s ending with a
/// single [`TokenKind::Eof`]. Whitespace runs inside brackets are
/// suppressed unless requested at construction.
pub struct Lexer<R> {
    src: SourceReader<R>,
    mode: Mode,
    report_whitespace: bool,
}

impl<R: Read> Lexer<R> {
    /// Create a lexer that suppresses whitespace tokens.
    pub fn new(input: R) -> Self {
        Self::with_whitespace(input, false)
    }

    /// Create a lexer, choosing whether whitespace runs inside brackets
    /// are reported as tokens.
    pub fn with_whitespace(input: R, report_whitespace: bool) -> Self {
        Self {
            src: SourceReader::new(input),
            mode: Mode::Text,
            report_whitespace,
        }
    }

    /// Lex the entire input into a token stream.
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            if self.report_whitespace || !matches!(token.kind, TokenKind::Whitespace(_)) {
                tokens.push(token);
            }
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        match self.mode {
            Mode::Text => self.scan_text(),
            Mode::Object | Mode::Tag => self.scan_bracketed(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Text mode
    // ─────────────────────────────────────────────────────────────

    /// Scan one token in text mode: a bracket opener, or a text run up to
    /// the next opener or end of input. Text mode never errors.
    fn scan_text(&mut self) -> Result<Token, LexError> {
        let start = self.src.position();
        if self.src.at_end()? {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        }
        if let Some(token) = self.scan_bracket(start, true)? {
            return Ok(token);
        }

        let mut text = String::new();
        while let Some(ch) = self.src.peek()? {
            if self.src.starts_with("{{")? || self.src.starts_with("{%")? {
                break;
            }
            text.push(ch);
            self.src.bump()?;
        }
        Ok(Token::new(TokenKind::Text(text), self.span_from(start)))
    }

    // ─────────────────────────────────────────────────────────────
    // Object / tag mode
    // ─────────────────────────────────────────────────────────────

    /// Scan one token inside `{{ }}` or `{% %}`. First match wins:
    /// brackets, whitespace, strings, numbers, punctuation, comparison
    /// operators (two-character forms before their prefixes), then
    /// identifiers. Anything else is a lex error.
    fn scan_bracketed(&mut self) -> Result<Token, LexError> {
        let start = self.src.position();
        if let Some(token) = self.scan_bracket(start, false)? {
            return Ok(token);
        }

        let Some(ch) = self.src.peek()? else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        };

        if ch.is_whitespace() {
            let run = self.collect_while(char::is_whitespace)?;
            return Ok(Token::new(TokenKind::Whitespace(run), self.span_from(start)));
        }
        if ch == '"' || ch == '\'' {
            return self.scan_string(start);
        }
        if ch.is_ascii_digit() {
            let digits = self.collect_while(|c| c.is_ascii_digit())?;
            let value: f64 = digits.parse().unwrap_or(0.0);
            return Ok(Token::new(TokenKind::Number(value), self.span_from(start)));
        }

        if let Some(kind) = self.scan_operator(ch)? {
            return Ok(Token::new(kind, self.span_from(start)));
        }

        if is_ident_start(ch) {
            let word = self.collect_ident()?;
            return Ok(Token::new(TokenKind::from_word(word), self.span_from(start)));
        }

        Err(LexError::UnexpectedChar { ch, at: start })
    }

    /// Recognise any of the four bracket sequences and perform its mode
    /// transition. In text mode only the openers apply: a stray `}}` or
    /// `%}` there stays ordinary text.
    fn scan_bracket(&mut self, start: usize, text_mode: bool) -> Result<Option<Token>, LexError> {
        if self.src.starts_with("{{")? {
            self.bump_n(2)?;
            self.mode = Mode::Object;
            return Ok(Some(Token::new(TokenKind::ObjectOpen, self.span_from(start))));
        }
        if self.src.starts_with("{%")? {
            self.bump_n(2)?;
            self.mode = Mode::Tag;
            return Ok(Some(Token::new(TokenKind::TagOpen, self.span_from(start))));
        }
        if !text_mode {
            if self.src.starts_with("}}")? {
                self.bump_n(2)?;
                self.mode = Mode::Text;
                return Ok(Some(Token::new(TokenKind::ObjectClose, self.span_from(start))));
            }
            if self.src.starts_with("%}")? {
                self.bump_n(2)?;
                self.mode = Mode::Text;
                return Ok(Some(Token::new(TokenKind::TagClose, self.span_from(start))));
            }
        }
        Ok(None)
    }

    /// Punctuation and comparison operators.
    fn scan_operator(&mut self, ch: char) -> Result<Option<TokenKind>, LexError> {
        let kind = match ch {
            '.' => TokenKind::Dot,
            '|' => TokenKind::Pipe,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '>' | '<' | '=' | '!' => {
                let two = self.src.peek_at(1)? == Some('=');
                match (ch, two) {
                    ('>', true) => {
                        self.src.bump()?;
                        TokenKind::GreaterEq
                    }
                    ('<', true) => {
                        self.src.bump()?;
                        TokenKind::LessEq
                    }
                    ('=', true) => {
                        self.src.bump()?;
                        TokenKind::EqEq
                    }
                    ('!', true) => {
                        self.src.bump()?;
                        TokenKind::NotEq
                    }
                    ('>', false) => TokenKind::Greater,
                    ('<', false) => TokenKind::Less,
                    _ => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
        self.src.bump()?;
        Ok(Some(kind))
    }

    /// Scan a string literal: single or double quoted, backslash escapes
    /// the following character verbatim, an unterminated string consumes
    /// to end of input.
    fn scan_string(&mut self, start: usize) -> Result<Token, LexError> {
        let quote = self.src.bump()?;
        let mut buf = String::new();
        while let Some(ch) = self.src.peek()? {
            if Some(ch) == quote {
                self.src.bump()?;
                break;
            }
            if ch == '\\' {
                self.src.bump()?;
                if let Some(escaped) = self.src.bump()? {
                    buf.push(escaped);
                }
            } else {
                buf.push(ch);
                self.src.bump()?;
            }
        }
        Ok(Token::new(TokenKind::Str(buf), self.span_from(start)))
    }

    fn collect_ident(&mut self) -> Result<String, LexError> {
        let mut word = String::new();
        if let Some(ch) = self.src.peek()? {
            if is_ident_start(ch) {
                word.push(ch);
                self.src.bump()?;
            }
        }
        word.push_str(&self.collect_while(is_ident_part)?);
        Ok(word)
    }

    fn collect_while(&mut self, predicate: impl Fn(char) -> bool) -> Result<String, LexError> {
        let mut out = String::new();
        while let Some(ch) = self.src.peek()? {
            if !predicate(ch) {
                break;
            }
            out.push(ch);
            self.src.bump()?;
        }
        Ok(out)
    }

    fn bump_n(&mut self, n: usize) -> Result<(), LexError> {
        for _ in 0..n {
            self.src.bump()?;
        }
        Ok(())
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.src.position())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
