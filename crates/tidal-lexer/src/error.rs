//! Lexer error type.

use thiserror::Error;

/// Error raised while tokenizing.
///
/// Text mode never errors by construction: unrecognised characters there
/// are consumed as ordinary text. Inside `{{ }}` or `{% %}`, a character
/// matching no token rule aborts the whole lex.
#[derive(Debug, Error)]
pub enum LexError {
    /// A character with no token rule in object or tag mode.
    #[error("unexpected character '{ch}' at offset {at}")]
    UnexpectedChar { ch: char, at: usize },

    /// The underlying source could not be read.
    #[error("failed to read template source: {0}")]
    Io(#[from] std::io::Error),
}
