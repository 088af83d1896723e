//! Abstract Syntax Tree (AST) for boolean expressions
//!
//! The AST is what the parser hands back to the caller. Predicates always
//! reference variables by [`VariableId`](crate::registry::VariableId), never
//! by name, and comparisons are stored variable-first.

pub mod nodes;
pub mod visitor;

pub use nodes::{
    BoolLiteral, ComparisonOp, Conjunction, Disjunction, Expression, ListQuantifier, Negation,
    NoExtension, NumericComparison, NumericLiteral, Quantified, QuantifierOp, SetMembership,
    SetOp, StringComparison, UnaryTest, UnaryTestKind, ValueInList, VarInSet,
};
pub use visitor::{walk_expression, Visitor};
