//! Integration tests for predicate grammar extensions

use boolex_core::ast::ComparisonOp;
use boolex_core::testing::*;
use boolex_parser::lexical::{keyword, string_literal, symbol, variable};
use boolex_parser::{parse, Category, Expression, Extension, Parser, Registry, VarType, VariableId};
use nom::branch::alt;
use nom::combinator::map;
use nom::IResult;
use std::fmt;

/// `? user fits 'pattern'`
#[derive(Debug, Clone, PartialEq)]
struct FitExpr {
    var: VariableId,
    value: String,
}

impl fmt::Display for FitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "? {} fits \"{}\"", self.var, self.value)
    }
}

fn fits<'a>(registry: &Registry, input: &'a str) -> IResult<&'a str, FitExpr> {
    let (rest, _) = symbol("?")(input)?;
    let (rest, var) = variable(registry, Category::String, rest)?;
    let (rest, _) = keyword("fits")(rest)?;
    let (rest, value) = string_literal(rest)?;
    Ok((rest, FitExpr { var, value }))
}

struct Fits;

impl Extension for Fits {
    type Predicate = FitExpr;

    fn predicate<'a>(registry: &Registry, input: &'a str) -> IResult<&'a str, FitExpr> {
        fits(registry, input)
    }
}

/// `user like 'pattern'`
#[derive(Debug, Clone, PartialEq)]
struct LikeExpr {
    var: VariableId,
    pattern: String,
}

fn like<'a>(registry: &Registry, input: &'a str) -> IResult<&'a str, LikeExpr> {
    let (rest, var) = variable(registry, Category::String, input)?;
    let (rest, _) = keyword("like")(rest)?;
    let (rest, pattern) = string_literal(rest)?;
    Ok((rest, LikeExpr { var, pattern }))
}

/// Two grammars behind one extension
#[derive(Debug, Clone, PartialEq)]
enum HostPredicate {
    Fits(FitExpr),
    Like(LikeExpr),
}

impl fmt::Display for HostPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPredicate::Fits(fit) => write!(f, "{}", fit),
            HostPredicate::Like(like) => write!(f, "{} like \"{}\"", like.var, like.pattern),
        }
    }
}

struct Host;

impl Extension for Host {
    type Predicate = HostPredicate;

    fn predicate<'a>(registry: &Registry, input: &'a str) -> IResult<&'a str, HostPredicate> {
        alt((
            map(|i: &'a str| fits(registry, i), HostPredicate::Fits),
            map(|i: &'a str| like(registry, i), HostPredicate::Like),
        ))(input)
    }
}

fn registry() -> (Registry, VariableId, VariableId) {
    let mut registry = Registry::new();
    let on = registry.declare("on", VarType::Boolean);
    let user = registry.declare("user", VarType::String);
    (registry, on, user)
}

fn fit(var: VariableId, value: &str) -> FitExpr {
    FitExpr {
        var,
        value: value.to_string(),
    }
}

#[test]
fn test_base_language_still_parses() {
    let (registry, on, user) = registry();
    let parser = Parser::<Fits>::new(&registry);

    assert_eq!(parser.parse("on"), Ok(var(on)));
    assert_eq!(
        parser.parse("\"lalala\" <> user"),
        Ok(str_cmp(user, ComparisonOp::Ne, "lalala"))
    );
    assert_eq!(
        parser.parse("user = 'pepepe'"),
        Ok(str_cmp(user, ComparisonOp::Eq, "pepepe"))
    );
}

#[test]
fn test_extension_predicate() {
    let (registry, _, user) = registry();
    let parser = Parser::<Fits>::new(&registry);

    assert_eq!(
        parser.parse("? user fits 'pepepe'"),
        Ok(Expression::Extension(fit(user, "pepepe")))
    );
}

#[test]
fn test_extension_combines_with_base_language() {
    let (registry, on, user) = registry();
    let parser = Parser::<Fits>::new(&registry);

    let expr = parser.parse("on and not (? user fits 'a' or ? user fits \"b\")").unwrap();
    assert_eq!(
        expr,
        and(vec![
            var(on),
            not(or(vec![
                Expression::Extension(fit(user, "a")),
                Expression::Extension(fit(user, "b")),
            ])),
        ])
    );
    assert_eq!(expr.to_string(), "(#1 and not (? #2 fits \"a\" or ? #2 fits \"b\"))");
}

#[test]
fn test_extension_respects_variable_types() {
    let (registry, _, _) = registry();
    let parser = Parser::<Fits>::new(&registry);

    assert!(parser.parse("? on fits 'x'").is_err());
    assert!(parser.parse("? user fits").is_err());
    assert!(parser.parse("? user fits 'x' trailing").is_err());
}

#[test]
fn test_base_parser_rejects_extension_syntax() {
    let (registry, _, _) = registry();

    assert!(parse(&registry, "? user fits 'pepepe'").is_err());
    assert!(parse(&registry, "user like 'p%'").is_err());
}

#[test]
fn test_composed_extensions() {
    let (registry, _, user) = registry();
    let parser = Parser::<Host>::new(&registry);

    assert_eq!(
        parser.parse("? user fits 'a' || user like 'b%'"),
        Ok(or(vec![
            Expression::Extension(HostPredicate::Fits(fit(user, "a"))),
            Expression::Extension(HostPredicate::Like(LikeExpr {
                var: user,
                pattern: "b%".to_string(),
            })),
        ]))
    );
    // built-in predicates are tried before the extension
    assert_eq!(parser.parse("user = 'b'"), Ok(str_cmp(user, ComparisonOp::Eq, "b")));
}
