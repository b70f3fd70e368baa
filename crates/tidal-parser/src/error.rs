//! Parser error type.

use thiserror::Error;
use tidal_types::Span;

/// Error raised on a structural mismatch in the token stream.
///
/// Parsing is fail-fast: no partial tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Something else appeared where a particular construct was required.
    #[error("expected {expected}, found '{found}' at {span}")]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },

    /// A `{% … %}` tag whose keyword the grammar does not support.
    #[error("unsupported tag '{keyword}' at {span}")]
    UnsupportedTag { keyword: String, span: Span },
}
