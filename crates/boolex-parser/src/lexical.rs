//! Lexical primitives
//!
//! Tokens of the base language as standalone nom parsers. Each one skips
//! leading whitespace itself, so rules chain them directly. They are public
//! so extension grammars can reuse the base language's literals, operators
//! and variable lookup.

use boolex_core::ast::{ComparisonOp, NumericLiteral, QuantifierOp, SetOp};
use boolex_core::{Category, Registry, VariableId};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char as pchar, digit0, digit1, i64 as int64, one_of};
use nom::combinator::{map, opt, recognize, value};
use nom::error::{Error, ErrorKind};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

/// Characters that make up words: keywords and identifier-like names
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace between tokens: ASCII whitespace plus vertical tab
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Optional run of whitespace
pub fn space0(input: &str) -> IResult<&str, &str> {
    take_while(is_space)(input)
}

/// Non-empty run of whitespace
pub fn space1(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

fn mismatch<O>(input: &str, kind: ErrorKind) -> IResult<&str, O> {
    Err(nom::Err::Error(Error::new(input, kind)))
}

/// A match ending in a word character may not run into another one
fn ends_word(matched: &str, rest: &str) -> bool {
    match (matched.chars().next_back(), rest.chars().next()) {
        (Some(last), Some(next)) => !(is_word_char(last) && is_word_char(next)),
        _ => true,
    }
}

/// Punctuation or operator token, e.g. `(`, `&&`, `<=`
pub fn symbol<'a>(text: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(space0, tag(text))
}

/// Keyword phrase such as `not`, `is null` or `none of`.
///
/// Words of the phrase may be separated by any run of whitespace, and each
/// word must end on a word boundary, so `in` does not match `inside`.
pub fn keyword<'a>(phrase: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| -> IResult<&'a str, &'a str> {
        let (start, _) = space0(input)?;
        let mut rest = start;
        for (i, word) in phrase.split_whitespace().enumerate() {
            if i > 0 {
                rest = space1(rest)?.0;
            }
            let (after, matched) = tag(word)(rest)?;
            if !ends_word(matched, after) {
                return mismatch(rest, ErrorKind::Tag);
            }
            rest = after;
        }
        let consumed = start.len() - rest.len();
        Ok((rest, &start[..consumed]))
    }
}

/// Longest variable name declared in `category` at the start of `input`
pub fn variable<'a>(
    registry: &Registry,
    category: Category,
    input: &'a str,
) -> IResult<&'a str, VariableId> {
    let (input, _) = space0(input)?;
    registry
        .table(category)
        .longest_match_by(input, |len| len > 0 && ends_word(&input[..len], &input[len..]))
        .map(|(id, len)| (&input[len..], id))
        .ok_or(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
}

/// Signed decimal integer
pub fn integer_literal(input: &str) -> IResult<&str, i64> {
    preceded(space0, int64)(input)
}

/// Real number that has a decimal point or an exponent; `5` is rejected
pub fn strict_real(input: &str) -> IResult<&str, f64> {
    let (rest, text) = preceded(
        space0,
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(tuple((digit1, pchar('.'), digit0))),
                recognize(pair(pchar('.'), digit1)),
                digit1,
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
    )(input)?;

    if !text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        return mismatch(input, ErrorKind::Float);
    }
    match text.parse::<f64>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => mismatch(input, ErrorKind::Float),
    }
}

/// Real if the text is a strict real, integer otherwise
pub fn numeric_literal(input: &str) -> IResult<&str, NumericLiteral> {
    alt((
        map(strict_real, NumericLiteral::Real),
        map(integer_literal, NumericLiteral::Integer),
    ))(input)
}

/// Single- or double-quoted string, taken verbatim up to the matching quote
pub fn string_literal(input: &str) -> IResult<&str, String> {
    let (rest, content) = preceded(
        space0,
        alt((
            delimited(pchar('"'), take_while(|c: char| c != '"'), pchar('"')),
            delimited(pchar('\''), take_while(|c: char| c != '\''), pchar('\'')),
        )),
    )(input)?;
    Ok((rest, content.to_string()))
}

fn literal_list<'a, O, F>(item: F) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(symbol("("), separated_list1(symbol(","), item), symbol(")"))
}

/// `(1, 2, 3)`
pub fn integer_list(input: &str) -> IResult<&str, Vec<i64>> {
    literal_list(integer_literal)(input)
}

/// `('a', "b")`
pub fn string_list(input: &str) -> IResult<&str, Vec<String>> {
    literal_list(string_literal)(input)
}

/// `=` or `<>`
pub fn equality_op(input: &str) -> IResult<&str, ComparisonOp> {
    alt((
        value(ComparisonOp::Eq, symbol("=")),
        value(ComparisonOp::Ne, symbol("<>")),
    ))(input)
}

/// Any comparison operator
pub fn comparison_op(input: &str) -> IResult<&str, ComparisonOp> {
    alt((
        equality_op,
        value(ComparisonOp::Ge, symbol(">=")),
        value(ComparisonOp::Gt, symbol(">")),
        value(ComparisonOp::Le, symbol("<=")),
        value(ComparisonOp::Lt, symbol("<")),
    ))(input)
}

/// `in` or `not in`
pub fn set_op(input: &str) -> IResult<&str, SetOp> {
    alt((
        value(SetOp::In, keyword("in")),
        value(SetOp::NotIn, keyword("not in")),
    ))(input)
}

/// `one of`, `all of` or `none of`
pub fn quantifier_op(input: &str) -> IResult<&str, QuantifierOp> {
    alt((
        value(QuantifierOp::OneOf, keyword("one of")),
        value(QuantifierOp::AllOf, keyword("all of")),
        value(QuantifierOp::NoneOf, keyword("none of")),
    ))(input)
}
