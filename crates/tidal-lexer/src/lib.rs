//! tidal lexer: converts template source into a token stream.
//!
//! The [`Lexer`] streams from any [`std::io::Read`]; [`tokenize`] and
//! [`tokenize_with_whitespace`] are conveniences for in-memory sources.

mod error;
mod lexer;
mod reader;
pub mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{is_keyword, Token, TokenKind, KEYWORDS};

/// Lex an in-memory template with whitespace tokens suppressed.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source.as_bytes()).lex()
}

/// Lex an in-memory template, reporting whitespace runs inside brackets
/// as tokens.
pub fn tokenize_with_whitespace(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::with_whitespace(source.as_bytes(), true).lex()
}
