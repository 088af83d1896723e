// boolex parser - boolean predicate expressions over declared variables

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Pluggable predicate grammars
pub mod extension;

/// Layered expression grammar
pub mod grammar;

/// Tokens shared by the grammar and by extensions
pub mod lexical;

pub use boolex_core::ast;
pub use boolex_core::{Category, Expression, NoExtension, Registry, VarType, VariableId};
pub use extension::Extension;
pub use grammar::{Parser, MAX_DEPTH};

use thiserror::Error;

/// Error returned when an expression is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not an expression of the language
    #[error("Invalid expression: {input}")]
    Mismatch {
        /// The rejected text
        input: String,
    },
}

/// Result of a parse
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse `text` with the base language only
pub fn parse(registry: &Registry, text: &str) -> ParseResult<Expression> {
    Parser::<NoExtension>::new(registry).parse(text)
}
