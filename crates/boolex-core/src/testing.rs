//! Test utilities and helper functions for boolex tests
//!
//! Short constructors for the expected side of parser assertions, so a test
//! reads `and(vec![var(on), is_null(off)])` instead of spelling out every
//! node. All of them are generic over the extension payload.

use crate::ast::{
    ComparisonOp, Expression, ListQuantifier, NumericComparison, NumericLiteral, Quantified,
    QuantifierOp, SetMembership, SetOp, StringComparison, UnaryTest, UnaryTestKind, ValueInList,
    VarInSet,
};
use crate::registry::VariableId;

/// `true` / `false`
pub fn boolean<P>(value: bool) -> Expression<P> {
    Expression::boolean(value)
}

/// Boolean variable reference
pub fn var<P>(id: VariableId) -> Expression<P> {
    Expression::Variable(id)
}

pub fn is_null<P>(id: VariableId) -> Expression<P> {
    UnaryTest::new(id, UnaryTestKind::IsNull).into()
}

pub fn is_not_null<P>(id: VariableId) -> Expression<P> {
    UnaryTest::new(id, UnaryTestKind::IsNotNull).into()
}

pub fn is_empty<P>(id: VariableId) -> Expression<P> {
    UnaryTest::new(id, UnaryTestKind::IsEmpty).into()
}

pub fn not<P>(expr: Expression<P>) -> Expression<P> {
    Expression::not(expr)
}

pub fn and<P>(items: Vec<Expression<P>>) -> Expression<P> {
    Expression::and(items)
}

pub fn or<P>(items: Vec<Expression<P>>) -> Expression<P> {
    Expression::or(items)
}

/// Numeric comparison; `5` gives an integer literal and `5.0` a real one
pub fn num_cmp<P>(
    id: VariableId,
    op: ComparisonOp,
    literal: impl Into<NumericLiteral>,
) -> Expression<P> {
    NumericComparison::new(id, op, literal.into()).into()
}

pub fn str_cmp<P>(id: VariableId, op: ComparisonOp, literal: &str) -> Expression<P> {
    StringComparison::new(id, op, literal).into()
}

/// Element type of a literal list, either `i64` or `String`
pub trait Element: Sized {
    fn value_in_list(m: ValueInList<Self>) -> SetMembership;
    fn var_in_set(m: VarInSet<Self>) -> SetMembership;
    fn quantified(q: Quantified<Self>) -> ListQuantifier;
}

impl Element for i64 {
    fn value_in_list(m: ValueInList<Self>) -> SetMembership {
        m.into()
    }

    fn var_in_set(m: VarInSet<Self>) -> SetMembership {
        m.into()
    }

    fn quantified(q: Quantified<Self>) -> ListQuantifier {
        q.into()
    }
}

impl Element for String {
    fn value_in_list(m: ValueInList<Self>) -> SetMembership {
        m.into()
    }

    fn var_in_set(m: VarInSet<Self>) -> SetMembership {
        m.into()
    }

    fn quantified(q: Quantified<Self>) -> ListQuantifier {
        q.into()
    }
}

/// Build a string list from literals
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `value in list`
pub fn value_in<P, T: Element>(value: T, list: VariableId) -> Expression<P> {
    Expression::Set(T::value_in_list(ValueInList::new(value, SetOp::In, list)))
}

/// `value not in list`
pub fn value_not_in<P, T: Element>(value: T, list: VariableId) -> Expression<P> {
    Expression::Set(T::value_in_list(ValueInList::new(value, SetOp::NotIn, list)))
}

/// `var in (a, b, ...)`
pub fn var_in<P, T: Element>(id: VariableId, set: Vec<T>) -> Expression<P> {
    Expression::Set(T::var_in_set(VarInSet::new(id, SetOp::In, set)))
}

/// `var not in (a, b, ...)`
pub fn var_not_in<P, T: Element>(id: VariableId, set: Vec<T>) -> Expression<P> {
    Expression::Set(T::var_in_set(VarInSet::new(id, SetOp::NotIn, set)))
}

fn quantifier<P, T: Element>(id: VariableId, op: QuantifierOp, set: Vec<T>) -> Expression<P> {
    Expression::List(T::quantified(Quantified::new(id, op, set)))
}

pub fn one_of<P, T: Element>(id: VariableId, set: Vec<T>) -> Expression<P> {
    quantifier(id, QuantifierOp::OneOf, set)
}

pub fn all_of<P, T: Element>(id: VariableId, set: Vec<T>) -> Expression<P> {
    quantifier(id, QuantifierOp::AllOf, set)
}

pub fn none_of<P, T: Element>(id: VariableId, set: Vec<T>) -> Expression<P> {
    quantifier(id, QuantifierOp::NoneOf, set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NoExtension;

    #[test]
    fn test_builders_match_constructors() {
        let id = VariableId::new(2);

        let built: Expression<NoExtension> = var_in(id, vec![1i64, 2]);
        assert_eq!(
            built,
            Expression::Set(SetMembership::IntegerVarInSet(VarInSet::new(
                id,
                SetOp::In,
                vec![1, 2]
            )))
        );

        let built: Expression<NoExtension> = value_not_in("x".to_string(), id);
        assert_eq!(
            built,
            Expression::Set(SetMembership::StringInList(ValueInList::new(
                "x".to_string(),
                SetOp::NotIn,
                id
            )))
        );

        let built: Expression<NoExtension> = all_of(id, strings(&["a"]));
        assert_eq!(built.to_string(), "#2 all of (\"a\")");
    }
}
