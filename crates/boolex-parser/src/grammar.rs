//! Expression grammar
//!
//! Layers, loosest binding first:
//!
//! ```text
//! disjunction := conjunction (("or" | "||") conjunction)*
//! conjunction := factor (("and" | "&&") factor)*
//! factor      := "not" group | group
//! group       := "(" disjunction ")" | predicate
//! ```
//!
//! A combinator layer that matched a single operand returns that operand
//! unchanged, so `true` parses to a bare literal rather than a one-element
//! conjunction inside a one-element disjunction.
//!
//! Parentheses nest at most [`MAX_DEPTH`] levels deep; deeper input is
//! rejected like any other mismatch.

use crate::extension::Extension;
use crate::lexical::{
    comparison_op, equality_op, integer_list, integer_literal, keyword, numeric_literal,
    quantifier_op, set_op, space0, string_list, string_literal, symbol, variable,
};
use crate::{ParseError, ParseResult};
use boolex_core::ast::{
    ListQuantifier, NumericComparison, Quantified, SetMembership, StringComparison, UnaryTest,
    UnaryTestKind, ValueInList, VarInSet,
};
use boolex_core::{Category, Expression, NoExtension, Registry, VariableId};
use nom::branch::alt;
use nom::combinator::{eof, map, value};
use nom::error::{Error, ErrorKind};
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;
use std::marker::PhantomData;
use tracing::{debug, trace};

type Expr<E> = Expression<<E as Extension>::Predicate>;

/// Deepest parenthesis nesting a parse accepts
pub const MAX_DEPTH: usize = 128;

/// Parser for the base language plus the predicates of extension `E`.
///
/// Holds a shared borrow of the registry, so no declaration can happen while
/// a parser exists. A parser is cheap to build and can be shared between
/// threads.
pub struct Parser<'r, E: Extension = NoExtension> {
    registry: &'r Registry,
    extension: PhantomData<fn() -> E>,
}

impl<'r, E: Extension> Parser<'r, E> {
    /// Create a parser resolving names against `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            extension: PhantomData,
        }
    }

    /// Parse a complete expression.
    ///
    /// Everything but trailing whitespace must be consumed. Any mismatch is
    /// reported as [`ParseError::Mismatch`].
    pub fn parse<'a>(&self, text: &'a str) -> ParseResult<Expr<E>> {
        trace!(text, "parsing expression");

        let result = terminated(|i: &'a str| self.disjunction(0, i), pair(space0, eof))(text);

        match result {
            Ok((_, expr)) => {
                debug!(text, %expr, "parsed expression");
                Ok(expr)
            }
            Err(err) => {
                debug!(text, ?err, "rejected expression");
                Err(ParseError::Mismatch {
                    input: text.to_string(),
                })
            }
        }
    }

    fn disjunction<'a>(&self, depth: usize, input: &'a str) -> IResult<&'a str, Expr<E>> {
        map(
            separated_list1(
                alt((symbol("||"), keyword("or"))),
                |i: &'a str| self.conjunction(depth, i),
            ),
            |items| collapse(items, Expression::or),
        )(input)
    }

    fn conjunction<'a>(&self, depth: usize, input: &'a str) -> IResult<&'a str, Expr<E>> {
        map(
            separated_list1(
                alt((symbol("&&"), keyword("and"))),
                |i: &'a str| self.factor(depth, i),
            ),
            |items| collapse(items, Expression::and),
        )(input)
    }

    /// `not` binds to a single group: `not a and b` negates only `a`
    fn factor<'a>(&self, depth: usize, input: &'a str) -> IResult<&'a str, Expr<E>> {
        alt((
            map(
                preceded(keyword("not"), |i: &'a str| self.group(depth, i)),
                Expression::not,
            ),
            |i: &'a str| self.group(depth, i),
        ))(input)
    }

    fn group<'a>(&self, depth: usize, input: &'a str) -> IResult<&'a str, Expr<E>> {
        alt((
            |i: &'a str| self.nested(depth, i),
            |i: &'a str| self.predicate(i),
        ))(input)
    }

    /// `( disjunction )`, one level below `depth`
    fn nested<'a>(&self, depth: usize, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let (rest, _) = symbol("(")(input)?;
        if depth >= MAX_DEPTH {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::TooLarge)));
        }
        let (rest, expr) = self.disjunction(depth + 1, rest)?;
        let (rest, _) = symbol(")")(rest)?;
        Ok((rest, expr))
    }

    fn predicate<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        alt((
            |i: &'a str| self.null_test(i),
            |i: &'a str| self.empty_test(i),
            |i: &'a str| self.numeric_comparison(i),
            |i: &'a str| self.string_comparison(i),
            |i: &'a str| self.set_membership(i),
            |i: &'a str| self.list_quantifier(i),
            boolean_literal,
            map(typed_var(self.registry, Category::Boolean), Expression::Variable),
            map(
                |i: &'a str| E::predicate(self.registry, i),
                Expression::Extension,
            ),
        ))(input)
    }

    /// `x is null`, `x is not null`; any declared variable
    fn null_test<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let (rest, var) = variable(self.registry, Category::Any, input)?;
        let (rest, kind) = alt((
            value(UnaryTestKind::IsNull, keyword("is null")),
            value(UnaryTestKind::IsNotNull, keyword("is not null")),
        ))(rest)?;
        Ok((rest, Expression::Unary(UnaryTest::new(var, kind))))
    }

    fn empty_test<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let (rest, var) = variable(self.registry, Category::List, input)?;
        let (rest, _) = keyword("is empty")(rest)?;
        Ok((rest, Expression::Unary(UnaryTest::new(var, UnaryTestKind::IsEmpty))))
    }

    /// Stored variable-first; `5 < x` becomes `x > 5`
    fn numeric_comparison<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let var = typed_var(self.registry, Category::Numeric);
        alt((
            map(
                tuple((var, comparison_op, numeric_literal)),
                |(var, op, literal)| Expression::Numeric(NumericComparison::new(var, op, literal)),
            ),
            map(
                tuple((numeric_literal, comparison_op, var)),
                |(literal, op, var)| {
                    Expression::Numeric(NumericComparison::new(var, op.mirror(), literal))
                },
            ),
        ))(input)
    }

    fn string_comparison<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let var = typed_var(self.registry, Category::String);
        alt((
            map(
                tuple((var, equality_op, string_literal)),
                |(var, op, literal)| Expression::String(StringComparison::new(var, op, literal)),
            ),
            map(
                tuple((string_literal, equality_op, var)),
                |(literal, op, var)| {
                    Expression::String(StringComparison::new(var, op.mirror(), literal))
                },
            ),
        ))(input)
    }

    fn set_membership<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let registry = self.registry;
        map(
            alt((
                map(
                    tuple((integer_literal, set_op, typed_var(registry, Category::IntegerList))),
                    |(value, op, list)| SetMembership::from(ValueInList::new(value, op, list)),
                ),
                map(
                    tuple((typed_var(registry, Category::Integer), set_op, integer_list)),
                    |(var, op, set)| SetMembership::from(VarInSet::new(var, op, set)),
                ),
                map(
                    tuple((string_literal, set_op, typed_var(registry, Category::StringList))),
                    |(value, op, list)| SetMembership::from(ValueInList::new(value, op, list)),
                ),
                map(
                    tuple((typed_var(registry, Category::String), set_op, string_list)),
                    |(var, op, set)| SetMembership::from(VarInSet::new(var, op, set)),
                ),
            )),
            Expression::Set,
        )(input)
    }

    /// Only in the variable-first form
    fn list_quantifier<'a>(&self, input: &'a str) -> IResult<&'a str, Expr<E>> {
        let registry = self.registry;
        map(
            alt((
                map(
                    tuple((
                        typed_var(registry, Category::IntegerList),
                        quantifier_op,
                        integer_list,
                    )),
                    |(var, op, set)| ListQuantifier::from(Quantified::new(var, op, set)),
                ),
                map(
                    tuple((
                        typed_var(registry, Category::StringList),
                        quantifier_op,
                        string_list,
                    )),
                    |(var, op, set)| ListQuantifier::from(Quantified::new(var, op, set)),
                ),
            )),
            Expression::List,
        )(input)
    }
}

fn boolean_literal<P>(input: &str) -> IResult<&str, Expression<P>> {
    map(
        alt((value(true, keyword("true")), value(false, keyword("false")))),
        Expression::boolean,
    )(input)
}

/// Variable lookup restricted to one category table
fn typed_var<'a, 'r>(
    registry: &'r Registry,
    category: Category,
) -> impl Fn(&'a str) -> IResult<&'a str, VariableId> + Copy + 'r {
    move |input: &'a str| variable(registry, category, input)
}

/// A single operand stands for itself
fn collapse<P>(
    mut items: Vec<Expression<P>>,
    combine: fn(Vec<Expression<P>>) -> Expression<P>,
) -> Expression<P> {
    if items.len() == 1 {
        if let Some(only) = items.pop() {
            return only;
        }
    }
    combine(items)
}
