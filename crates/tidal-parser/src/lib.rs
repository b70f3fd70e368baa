//! tidal parser: converts a token stream into a template tree.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use tidal_lexer::Token;
use tidal_types::ast::Root;

/// Parse a token stream into a template tree.
pub fn parse(tokens: Vec<Token>) -> Result<Root, ParseError> {
    Parser::new(tokens).parse()
}
