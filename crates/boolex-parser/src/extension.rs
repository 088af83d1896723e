//! Predicate grammar extensions
//!
//! A host adds its own predicate kinds by implementing [`Extension`] and
//! parsing with `Parser::<MyExtension>`. The extension's rule is the last
//! alternative of the predicate layer, so it only sees input none of the
//! built-in predicates accept, and whatever it returns is wrapped in
//! [`Expression::Extension`](boolex_core::Expression::Extension).
//!
//! One parser type carries one extension. Hosts that need several can
//! write an extension whose rule is itself an `alt` over them.

use boolex_core::{NoExtension, Registry};
use nom::error::{Error, ErrorKind};
use nom::IResult;
use std::fmt;

/// A self-contained predicate grammar spliced into the base language
pub trait Extension {
    /// AST payload produced by this grammar
    type Predicate: Clone + fmt::Debug + fmt::Display + PartialEq;

    /// Parse one extension predicate at the start of `input`.
    ///
    /// Follows the conventions of the base grammar: skip leading whitespace
    /// (the [`lexical`](crate::lexical) primitives do this), and report
    /// `nom::Err::Error` rather than `Failure` on a mismatch so the
    /// surrounding alternatives can backtrack.
    fn predicate<'a>(registry: &Registry, input: &'a str) -> IResult<&'a str, Self::Predicate>;
}

/// The base language alone; the extension rule never matches
impl Extension for NoExtension {
    type Predicate = NoExtension;

    fn predicate<'a>(_registry: &Registry, input: &'a str) -> IResult<&'a str, NoExtension> {
        Err(nom::Err::Error(Error::new(input, ErrorKind::Alt)))
    }
}
