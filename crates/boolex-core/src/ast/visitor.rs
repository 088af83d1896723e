//! Visitor pattern for traversing AST

use super::nodes::Expression;
use crate::registry::VariableId;
use std::collections::BTreeSet;

/// Visitor trait for AST traversal
pub trait Visitor<P>: Sized {
    /// Visit an expression
    fn visit_expression(&mut self, expr: &Expression<P>) {
        walk_expression(self, expr);
    }

    /// Visit a variable referenced by a predicate
    fn visit_variable(&mut self, _var: VariableId) {
        // Leaf node, no children
    }

    /// Visit an extension payload
    fn visit_extension(&mut self, _ext: &P) {
        // Opaque to the base language
    }
}

/// Walk an expression
pub fn walk_expression<P, V: Visitor<P>>(visitor: &mut V, expr: &Expression<P>) {
    match expr {
        Expression::Bool(_) => {}

        Expression::Variable(var) => visitor.visit_variable(*var),

        Expression::Numeric(cmp) => visitor.visit_variable(cmp.var),

        Expression::String(cmp) => visitor.visit_variable(cmp.var),

        Expression::Unary(test) => visitor.visit_variable(test.var),

        Expression::Set(set) => visitor.visit_variable(set.var()),

        Expression::List(list) => visitor.visit_variable(list.var()),

        Expression::Extension(ext) => visitor.visit_extension(ext),

        Expression::And(and) => {
            for item in &and.items {
                visitor.visit_expression(item);
            }
        }

        Expression::Or(or) => {
            for item in &or.items {
                visitor.visit_expression(item);
            }
        }

        Expression::Not(neg) => visitor.visit_expression(&neg.expr),
    }
}

struct VariableCollector {
    vars: BTreeSet<VariableId>,
}

impl<P> Visitor<P> for VariableCollector {
    fn visit_variable(&mut self, var: VariableId) {
        self.vars.insert(var);
    }
}

impl<P> Expression<P> {
    /// Variables referenced by the base-language predicates of this expression.
    ///
    /// Extension payloads are opaque and contribute nothing.
    pub fn variables(&self) -> BTreeSet<VariableId> {
        let mut collector = VariableCollector { vars: BTreeSet::new() };
        collector.visit_expression(self);
        collector.vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::{
        ComparisonOp, NoExtension, NumericComparison, Quantified, QuantifierOp, SetOp,
        UnaryTest, UnaryTestKind, ValueInList,
    };

    fn id(n: u64) -> VariableId {
        VariableId::new(n)
    }

    /// Test visitor that counts nodes
    #[derive(Default)]
    struct CountingVisitor {
        expressions: usize,
        variables: usize,
        extensions: usize,
    }

    impl<P> Visitor<P> for CountingVisitor {
        fn visit_expression(&mut self, expr: &Expression<P>) {
            self.expressions += 1;
            walk_expression(self, expr);
        }

        fn visit_variable(&mut self, _var: VariableId) {
            self.variables += 1;
        }

        fn visit_extension(&mut self, _ext: &P) {
            self.extensions += 1;
        }
    }

    #[test]
    fn test_count_literal() {
        let expr: Expression = Expression::boolean(true);

        let mut visitor = CountingVisitor::default();
        visitor.visit_expression(&expr);

        assert_eq!(visitor.expressions, 1);
        assert_eq!(visitor.variables, 0);
    }

    #[test]
    fn test_count_nested_expression() {
        let expr: Expression = Expression::and(vec![
            Expression::Variable(id(1)),
            Expression::not(Expression::or(vec![
                UnaryTest::new(id(2), UnaryTestKind::IsNull).into(),
                Expression::boolean(false),
            ])),
        ]);

        let mut visitor = CountingVisitor::default();
        visitor.visit_expression(&expr);

        assert_eq!(visitor.expressions, 6); // and, var, not, or, unary, bool
        assert_eq!(visitor.variables, 2);
    }

    #[test]
    fn test_count_extension() {
        let expr: Expression<&str> = Expression::or(vec![
            Expression::Extension("fits"),
            Expression::Variable(id(1)),
        ]);

        let mut visitor = CountingVisitor::default();
        visitor.visit_expression(&expr);

        assert_eq!(visitor.extensions, 1);
        assert_eq!(visitor.variables, 1);
    }

    #[test]
    fn test_collect_variables() {
        let expr: Expression<NoExtension> = Expression::or(vec![
            NumericComparison::new(id(3), ComparisonOp::Gt, 1.into()).into(),
            Expression::Set(ValueInList::new(7i64, SetOp::In, id(1)).into()),
            Expression::List(Quantified::new(id(3), QuantifierOp::AllOf, vec![1i64]).into()),
        ]);

        let vars: Vec<u64> = expr.variables().into_iter().map(VariableId::get).collect();
        assert_eq!(vars, vec![1, 3]);
    }
}
