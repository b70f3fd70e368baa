//! Token types for the tidal lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the template language
//! and [`Token`], which pairs a kind with a source [`Span`].

use std::fmt;
use tidal_types::Span;

/// Reserved words of the template language: control-flow tag names, word
/// operators, and literal/filter words.
///
/// An identifier matching one of these lexes as [`TokenKind::Keyword`]
/// rather than [`TokenKind::Ident`].
pub const KEYWORDS: &[&str] = &[
    // Control flow tags
    "assign", "capture", "case", "comment", "cycle", "for", "in", "break", "continue",
    "if", "include", "raw", "unless", "endfor", "endif", "endunless", "endcase",
    "else", "elsif", "when", "tablerow", "endtablerow", "increment", "decrement",
    "liquid", "echo", "render", "section", "endsection", "schema", "form",
    "paginate", "endpaginate", "layout", "block", "endblock", "extends",
    // Word operators
    "and", "or", "not", "contains", "equals", "greater_than", "less_than",
    "greater_than_or_equal_to", "less_than_or_equal_to", "not_equals",
    // Literal and filter words
    "true", "false", "nil", "null", "empty", "blank", "default", "with",
    "first", "last", "size",
];

/// Returns `true` if `word` is reserved.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
///
/// Tokens are immutable once produced; their spans are non-overlapping
/// and ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind of the template language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Raw template text outside `{{ }}` / `{% %}`.
    Text(String),
    /// `{{`
    ObjectOpen,
    /// `}}`
    ObjectClose,
    /// `{%`
    TagOpen,
    /// `%}`
    TagClose,
    /// User identifier: `name`, `page-title`, `_private`.
    Ident(String),
    /// Reserved word, carrying its lexeme.
    Keyword(String),
    /// Quoted string literal, quotes and escapes resolved.
    Str(String),
    /// Integer literal: `42`.
    Number(f64),
    /// `|`
    Pipe,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEq,
    /// `<=`
    LessEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// Whitespace run inside `{{ }}` / `{% %}` (reported only on request).
    Whitespace(String),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Classify an identifier-shaped lexeme as [`TokenKind::Keyword`] or
    /// [`TokenKind::Ident`].
    pub fn from_word(word: impl Into<String>) -> TokenKind {
        let word = word.into();
        if is_keyword(&word) {
            TokenKind::Keyword(word)
        } else {
            TokenKind::Ident(word)
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(_) => f.write_str("text"),
            TokenKind::ObjectOpen => f.write_str("{{"),
            TokenKind::ObjectClose => f.write_str("}}"),
            TokenKind::TagOpen => f.write_str("{%"),
            TokenKind::TagClose => f.write_str("%}"),
            TokenKind::Ident(s) => f.write_str(s),
            TokenKind::Keyword(s) => f.write_str(s),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Pipe => f.write_str("|"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::NotEq => f.write_str("!="),
            TokenKind::Whitespace(_) => f.write_str("whitespace"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
