//! tidal engine facade: orchestrates the template pipeline.
//!
//! ```text
//! template source → Lexer → Parser → Template (tree) → render(&Context) → String
//! ```
//!
//! A [`Template`] is parsed once and may be rendered any number of times;
//! the tree is immutable, so renders against independent contexts may run
//! concurrently.

use std::io::Read;

use thiserror::Error;
use tidal_eval::Context;
use tidal_lexer::{LexError, Lexer};
use tidal_parser::{ParseError, Parser};
use tidal_types::ast::Root;

/// Failure to turn template source into a tree.
///
/// The two stages stay distinguishable, so callers can report the
/// offending character (lexing) or the expected construct (parsing).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Root,
}

impl Template {
    /// Parse an in-memory template.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let tokens = tidal_lexer::tokenize(source)?;
        Ok(Self {
            root: Parser::new(tokens).parse()?,
        })
    }

    /// Parse a template from a streaming source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let tokens = Lexer::new(reader).lex()?;
        Ok(Self {
            root: Parser::new(tokens).parse()?,
        })
    }

    /// Render against the given bindings and filters.
    pub fn render(&self, ctx: &Context) -> String {
        tidal_eval::render(&self.root, ctx)
    }

    /// The underlying syntax tree.
    pub fn root(&self) -> &Root {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let template = Template::parse("2 + 2 = {{ 4 }}").unwrap();
        assert_eq!(template.render(&Context::default()), "2 + 2 = 4");
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        assert!(matches!(Template::parse("{{ ^ }}"), Err(Error::Lex(_))));
        assert!(matches!(
            Template::parse("{% bogus %}"),
            Err(Error::Parse(_))
        ));
    }
}
