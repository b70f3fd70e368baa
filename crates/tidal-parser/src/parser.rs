//! Recursive-descent parser: token stream to template tree.
//!
//! Grammar, informally:
//!
//! ```text
//! template    := (TEXT | object | tag)* EOF
//! object      := '{{' value '}}'
//! value       := literal | variableRef
//! variableRef := IDENT ( '|' name ( ':' literal ( ',' literal )* )? )*
//! tag         := '{%' "if" IDENT '%}' template-nodes '{%' "endif" '%}'
//! ```
//!
//! Whitespace tokens are skipped where a value is expected and kept as
//! text in template and tag-body positions, so the same tree comes out
//! whether or not the lexer reported whitespace.

use tidal_lexer::{Token, TokenKind};
use tidal_types::ast::{FilterSpec, Node, Root};
use tidal_types::Span;

use crate::error::ParseError;

/// The tidal parser.
///
/// Consumes a token stream produced by the lexer and builds the template
/// tree. Parsing is single-pass and fails fast on the first structural
/// mismatch.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser from a token stream.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let at = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::point(at)));
        }
        Self { tokens, pos: 0 }
    }

    /// Parse the whole stream into a [`Root`].
    pub fn parse(mut self) -> Result<Root, ParseError> {
        let mut nodes = Vec::new();
        while !self.at_end() {
            nodes.push(self.parse_node()?);
        }
        Ok(Root::new(nodes))
    }

    // ── Node dispatch ─────────────────────────────────────────────────────────

    /// Parse one template node: text, an object, or a tag.
    fn parse_node(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Text(content) => {
                self.advance();
                Ok(Node::Text(content))
            }
            TokenKind::Whitespace(content) => {
                self.advance();
                Ok(Node::Text(content))
            }
            TokenKind::ObjectOpen => self.parse_object(),
            TokenKind::TagOpen => self.parse_tag(),
            _ => Err(self.unexpected("text, '{{' or '{%'")),
        }
    }

    // ── Objects ───────────────────────────────────────────────────────────────

    /// `{{ value }}` — one literal or variable reference, wrapped in an
    /// object node marking the interpolation point.
    fn parse_object(&mut self) -> Result<Node, ParseError> {
        self.advance();
        self.skip_whitespace();

        let child = match self.peek_kind() {
            TokenKind::Ident(_) => self.parse_variable()?,
            TokenKind::Str(_) | TokenKind::Number(_) | TokenKind::Keyword(_) => {
                self.parse_literal()?
            }
            _ => return Err(self.unexpected("a literal or variable")),
        };

        self.skip_whitespace();
        self.expect(&TokenKind::ObjectClose, "'}}'")?;
        Ok(Node::Object(Box::new(child)))
    }

    /// A variable reference and its filter chain, in declaration order.
    fn parse_variable(&mut self) -> Result<Node, ParseError> {
        let (name, _) = self.expect_ident("a variable name")?;
        let mut filters = Vec::new();
        loop {
            self.skip_whitespace();
            if !self.eat(&TokenKind::Pipe) {
                break;
            }
            self.skip_whitespace();
            let (filter_name, _) = self.expect_name("a filter name")?;
            let mut args = Vec::new();
            self.skip_whitespace();
            if self.eat(&TokenKind::Colon) {
                loop {
                    self.skip_whitespace();
                    args.push(self.parse_literal()?);
                    self.skip_whitespace();
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            filters.push(FilterSpec::new(filter_name, args));
        }
        Ok(Node::Variable { name, filters })
    }

    /// A literal: string, number, or one of the literal keywords. Any
    /// other keyword — and a bare identifier — falls back to an opaque
    /// string equal to its lexeme; it is not resolved as a variable.
    fn parse_literal(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Str(s) => {
                self.advance();
                Ok(Node::StringLit(s))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(Node::NumberLit(n))
            }
            TokenKind::Keyword(word) => {
                self.advance();
                Ok(match word.as_str() {
                    "true" => Node::BoolLit(true),
                    "false" => Node::BoolLit(false),
                    "nil" | "null" => Node::NilLit,
                    _ => Node::StringLit(word),
                })
            }
            TokenKind::Ident(s) => {
                self.advance();
                Ok(Node::StringLit(s))
            }
            _ => Err(self.unexpected("a literal")),
        }
    }

    // ── Tags ──────────────────────────────────────────────────────────────────

    /// `{% keyword … %}` — only `if` is supported; anything else is an
    /// error naming the keyword.
    fn parse_tag(&mut self) -> Result<Node, ParseError> {
        self.advance();
        self.skip_whitespace();
        let (keyword, span) = self.expect_name("a tag keyword")?;
        if keyword == "if" {
            self.parse_if()
        } else {
            Err(ParseError::UnsupportedTag { keyword, span })
        }
    }

    /// The body of an `if` tag: everything up to the matching `endif`,
    /// recursing into nested objects and tags. Reaching end of input
    /// closes the body without error.
    fn parse_if(&mut self) -> Result<Node, ParseError> {
        self.skip_whitespace();
        let (condition, _) = self.expect_ident("a condition variable")?;
        self.skip_whitespace();
        self.expect(&TokenKind::TagClose, "'%}' after if condition")?;

        let mut body = Vec::new();
        loop {
            if self.at_end() {
                break;
            }
            if self.at_endif() {
                self.consume_endif();
                break;
            }
            body.push(self.parse_node()?);
        }
        Ok(Node::If { condition, body })
    }

    /// True if the upcoming tokens, ignoring whitespace, read `{% endif %}`.
    fn at_endif(&self) -> bool {
        if !matches!(self.kind_at(self.pos), TokenKind::TagOpen) {
            return false;
        }
        let name_at = self.skip_whitespace_from(self.pos + 1);
        let is_endif = match self.kind_at(name_at) {
            TokenKind::Keyword(word) | TokenKind::Ident(word) => word == "endif",
            _ => false,
        };
        if !is_endif {
            return false;
        }
        let close_at = self.skip_whitespace_from(name_at + 1);
        matches!(self.kind_at(close_at), TokenKind::TagClose)
    }

    fn consume_endif(&mut self) {
        self.advance();
        self.skip_whitespace();
        self.advance();
        self.skip_whitespace();
        self.advance();
    }

    // ── Token cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should end with Eof")
        })
    }

    /// Returns the kind of the current token.
    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Returns the kind at an absolute index, saturating at Eof.
    fn kind_at(&self, idx: usize) -> &TokenKind {
        self.tokens.get(idx).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    /// Advance the cursor by one.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns `true` if the current token is `Eof`.
    fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// If the current token matches, advance and return `true`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token kind, or fail naming `expected`.
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expect an identifier token. Returns its name and span.
    fn expect_ident(&mut self, expected: &str) -> Result<(String, Span), ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                let span = self.peek().span;
                self.advance();
                Ok((name, span))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Expect an identifier or keyword used as a name — tag and filter
    /// names may collide with the reserved-word set.
    fn expect_name(&mut self, expected: &str) -> Result<(String, Span), ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) | TokenKind::Keyword(name) => {
                let span = self.peek().span;
                self.advance();
                Ok((name, span))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Skip whitespace tokens (present only when the lexer reported them).
    fn skip_whitespace(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Whitespace(_)) {
            self.advance();
        }
    }

    fn skip_whitespace_from(&self, mut idx: usize) -> usize {
        while matches!(self.kind_at(idx), TokenKind::Whitespace(_)) {
            idx += 1;
        }
        idx
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: self.peek_kind().to_string(),
            span: self.peek().span,
        }
    }
}
