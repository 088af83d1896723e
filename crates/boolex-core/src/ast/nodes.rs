//! AST node definitions

use crate::registry::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of [`Expression::Extension`] when no extension grammar is linked in.
///
/// The type has no values, so the extension variant cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoExtension {}

impl fmt::Display for NoExtension {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// `true` or `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoolLiteral(pub bool);

/// A numeric literal.
///
/// Integers and reals never compare equal to each other, even when they
/// carry the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericLiteral {
    Integer(i64),
    Real(f64),
}

impl NumericLiteral {
    /// Check if this is an integer literal
    pub fn is_integer(&self) -> bool {
        matches!(self, NumericLiteral::Integer(_))
    }

    /// Value widened to `f64`
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericLiteral::Integer(n) => n as f64,
            NumericLiteral::Real(x) => x,
        }
    }
}

impl From<i64> for NumericLiteral {
    fn from(value: i64) -> Self {
        NumericLiteral::Integer(value)
    }
}

impl From<i32> for NumericLiteral {
    fn from(value: i32) -> Self {
        NumericLiteral::Integer(value.into())
    }
}

impl From<f64> for NumericLiteral {
    fn from(value: f64) -> Self {
        NumericLiteral::Real(value)
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericLiteral::Integer(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on whole values
            NumericLiteral::Real(x) => write!(f, "{:?}", x),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Gt, // >
    Ge, // >=
    Lt, // <
    Le, // <=
    Eq, // =
    Ne, // <>
}

impl ComparisonOp {
    /// Operator to use once the operands of a comparison are swapped
    pub fn mirror(self) -> Self {
        match self {
            ComparisonOp::Gt => ComparisonOp::Lt,
            ComparisonOp::Ge => ComparisonOp::Le,
            ComparisonOp::Lt => ComparisonOp::Gt,
            ComparisonOp::Le => ComparisonOp::Ge,
            ComparisonOp::Eq => ComparisonOp::Eq,
            ComparisonOp::Ne => ComparisonOp::Ne,
        }
    }

    /// `=` and `<>`, the only operators strings support
    pub fn is_equality(self) -> bool {
        matches!(self, ComparisonOp::Eq | ComparisonOp::Ne)
    }

    /// Source token
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Kind of unary test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryTestKind {
    IsNull,
    IsNotNull,
    IsEmpty,
}

impl fmt::Display for UnaryTestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryTestKind::IsNull => write!(f, "is null"),
            UnaryTestKind::IsNotNull => write!(f, "is not null"),
            UnaryTestKind::IsEmpty => write!(f, "is empty"),
        }
    }
}

/// `var is null`, `var is not null`, `list is empty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnaryTest {
    pub var: VariableId,
    pub kind: UnaryTestKind,
}

impl UnaryTest {
    pub fn new(var: VariableId, kind: UnaryTestKind) -> Self {
        Self { var, kind }
    }
}

/// Numeric variable compared against a literal, always stored variable-first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericComparison {
    pub var: VariableId,
    pub literal: NumericLiteral,
    pub op: ComparisonOp,
}

impl NumericComparison {
    pub fn new(var: VariableId, op: ComparisonOp, literal: NumericLiteral) -> Self {
        Self { var, literal, op }
    }
}

/// String variable compared against a literal with `=` or `<>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringComparison {
    pub var: VariableId,
    pub literal: String,
    pub op: ComparisonOp,
}

impl StringComparison {
    pub fn new(var: VariableId, op: ComparisonOp, literal: impl Into<String>) -> Self {
        debug_assert!(op.is_equality(), "strings only compare with = and <>");
        Self {
            var,
            literal: literal.into(),
            op,
        }
    }
}

/// Set membership operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    In,
    NotIn,
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOp::In => write!(f, "in"),
            SetOp::NotIn => write!(f, "not in"),
        }
    }
}

/// Literal value tested against a list variable (`123 in segments`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueInList<T> {
    pub value: T,
    pub op: SetOp,
    pub list: VariableId,
}

impl<T> ValueInList<T> {
    pub fn new(value: T, op: SetOp, list: VariableId) -> Self {
        Self { value, op, list }
    }
}

/// Scalar variable tested against a literal list (`width in (1, 2)`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarInSet<T> {
    pub var: VariableId,
    pub op: SetOp,
    pub set: Vec<T>,
}

impl<T> VarInSet<T> {
    pub fn new(var: VariableId, op: SetOp, set: Vec<T>) -> Self {
        Self { var, op, set }
    }
}

/// The four legal set membership shapes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetMembership {
    IntegerInList(ValueInList<i64>),
    StringInList(ValueInList<String>),
    IntegerVarInSet(VarInSet<i64>),
    StringVarInSet(VarInSet<String>),
}

impl SetMembership {
    /// The variable side of the test
    pub fn var(&self) -> VariableId {
        match self {
            SetMembership::IntegerInList(m) => m.list,
            SetMembership::StringInList(m) => m.list,
            SetMembership::IntegerVarInSet(m) => m.var,
            SetMembership::StringVarInSet(m) => m.var,
        }
    }

    pub fn op(&self) -> SetOp {
        match self {
            SetMembership::IntegerInList(m) => m.op,
            SetMembership::StringInList(m) => m.op,
            SetMembership::IntegerVarInSet(m) => m.op,
            SetMembership::StringVarInSet(m) => m.op,
        }
    }
}

impl From<ValueInList<i64>> for SetMembership {
    fn from(m: ValueInList<i64>) -> Self {
        SetMembership::IntegerInList(m)
    }
}

impl From<ValueInList<String>> for SetMembership {
    fn from(m: ValueInList<String>) -> Self {
        SetMembership::StringInList(m)
    }
}

impl From<VarInSet<i64>> for SetMembership {
    fn from(m: VarInSet<i64>) -> Self {
        SetMembership::IntegerVarInSet(m)
    }
}

impl From<VarInSet<String>> for SetMembership {
    fn from(m: VarInSet<String>) -> Self {
        SetMembership::StringVarInSet(m)
    }
}

/// List quantifier operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantifierOp {
    OneOf,
    AllOf,
    NoneOf,
}

impl fmt::Display for QuantifierOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantifierOp::OneOf => write!(f, "one of"),
            QuantifierOp::AllOf => write!(f, "all of"),
            QuantifierOp::NoneOf => write!(f, "none of"),
        }
    }
}

/// List variable quantified against a literal list (`segments all of (1, 2)`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantified<T> {
    pub var: VariableId,
    pub op: QuantifierOp,
    pub set: Vec<T>,
}

impl<T> Quantified<T> {
    pub fn new(var: VariableId, op: QuantifierOp, set: Vec<T>) -> Self {
        Self { var, op, set }
    }
}

/// Quantifier over an integer or string list variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListQuantifier {
    Integers(Quantified<i64>),
    Strings(Quantified<String>),
}

impl ListQuantifier {
    pub fn var(&self) -> VariableId {
        match self {
            ListQuantifier::Integers(q) => q.var,
            ListQuantifier::Strings(q) => q.var,
        }
    }

    pub fn op(&self) -> QuantifierOp {
        match self {
            ListQuantifier::Integers(q) => q.op,
            ListQuantifier::Strings(q) => q.op,
        }
    }
}

impl From<Quantified<i64>> for ListQuantifier {
    fn from(q: Quantified<i64>) -> Self {
        ListQuantifier::Integers(q)
    }
}

impl From<Quantified<String>> for ListQuantifier {
    fn from(q: Quantified<String>) -> Self {
        ListQuantifier::Strings(q)
    }
}

/// Operands joined with `and`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conjunction<P = NoExtension> {
    pub items: Vec<Expression<P>>,
}

/// Operands joined with `or`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disjunction<P = NoExtension> {
    pub items: Vec<Expression<P>>,
}

/// `not` applied to one operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Negation<P = NoExtension> {
    pub expr: Box<Expression<P>>,
}

/// A parsed boolean expression.
///
/// `P` is the payload of predicates contributed by an extension grammar.
/// Two expressions of different variants are never equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression<P = NoExtension> {
    /// `true` / `false`
    Bool(BoolLiteral),

    /// Boolean variable reference
    Variable(VariableId),

    /// Numeric comparison (`width > 5`)
    Numeric(NumericComparison),

    /// String comparison (`user = 'me'`)
    String(StringComparison),

    /// Null and empty tests
    Unary(UnaryTest),

    /// Set membership (`x in (1, 2)`, `3 in xs`)
    Set(SetMembership),

    /// List quantifier (`xs one of (1, 2)`)
    List(ListQuantifier),

    /// Predicate contributed by an extension grammar
    Extension(P),

    And(Conjunction<P>),

    Or(Disjunction<P>),

    Not(Negation<P>),
}

impl<P> Expression<P> {
    /// Create a conjunction of the given operands
    pub fn and(items: Vec<Expression<P>>) -> Self {
        Self::And(Conjunction { items })
    }

    /// Create a disjunction of the given operands
    pub fn or(items: Vec<Expression<P>>) -> Self {
        Self::Or(Disjunction { items })
    }

    /// Negate an expression
    pub fn not(expr: Expression<P>) -> Self {
        Self::Not(Negation { expr: Box::new(expr) })
    }

    /// Boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::Bool(BoolLiteral(value))
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Bool(_) => "bool",
            Expression::Variable(_) => "variable",
            Expression::Numeric(_) => "numeric_comparison",
            Expression::String(_) => "string_comparison",
            Expression::Unary(_) => "unary_test",
            Expression::Set(_) => "set_membership",
            Expression::List(_) => "list_quantifier",
            Expression::Extension(_) => "extension",
            Expression::And(_) => "and",
            Expression::Or(_) => "or",
            Expression::Not(_) => "not",
        }
    }

    /// Check if this is a predicate rather than a combinator
    pub fn is_predicate(&self) -> bool {
        !matches!(self, Expression::And(_) | Expression::Or(_) | Expression::Not(_))
    }
}

impl<P> From<BoolLiteral> for Expression<P> {
    fn from(value: BoolLiteral) -> Self {
        Expression::Bool(value)
    }
}

impl<P> From<VariableId> for Expression<P> {
    fn from(var: VariableId) -> Self {
        Expression::Variable(var)
    }
}

impl<P> From<NumericComparison> for Expression<P> {
    fn from(cmp: NumericComparison) -> Self {
        Expression::Numeric(cmp)
    }
}

impl<P> From<StringComparison> for Expression<P> {
    fn from(cmp: StringComparison) -> Self {
        Expression::String(cmp)
    }
}

impl<P> From<UnaryTest> for Expression<P> {
    fn from(test: UnaryTest) -> Self {
        Expression::Unary(test)
    }
}

impl<P> From<SetMembership> for Expression<P> {
    fn from(set: SetMembership) -> Self {
        Expression::Set(set)
    }
}

impl<P> From<ListQuantifier> for Expression<P> {
    fn from(list: ListQuantifier) -> Self {
        Expression::List(list)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains('"') {
        write!(f, "'{}'", s)
    } else {
        write!(f, "\"{}\"", s)
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(")")
}

fn write_joined<P: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[Expression<P>],
    separator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", separator)?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

impl fmt::Display for UnaryTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.var, self.kind)
    }
}

impl fmt::Display for NumericComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.var, self.op, self.literal)
    }
}

impl fmt::Display for StringComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.var, self.op)?;
        write_quoted(f, &self.literal)
    }
}

impl fmt::Display for SetMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetMembership::IntegerInList(m) => write!(f, "{} {} {}", m.value, m.op, m.list),
            SetMembership::StringInList(m) => {
                write_quoted(f, &m.value)?;
                write!(f, " {} {}", m.op, m.list)
            }
            SetMembership::IntegerVarInSet(m) => {
                write!(f, "{} {} ", m.var, m.op)?;
                write_list(f, &m.set, |f, n| write!(f, "{}", n))
            }
            SetMembership::StringVarInSet(m) => {
                write!(f, "{} {} ", m.var, m.op)?;
                write_list(f, &m.set, |f, s| write_quoted(f, s))
            }
        }
    }
}

impl fmt::Display for ListQuantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListQuantifier::Integers(q) => {
                write!(f, "{} {} ", q.var, q.op)?;
                write_list(f, &q.set, |f, n| write!(f, "{}", n))
            }
            ListQuantifier::Strings(q) => {
                write!(f, "{} {} ", q.var, q.op)?;
                write_list(f, &q.set, |f, s| write_quoted(f, s))
            }
        }
    }
}

impl<P: fmt::Display> fmt::Display for Expression<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Bool(BoolLiteral(value)) => write!(f, "{}", value),
            Expression::Variable(var) => write!(f, "{}", var),
            Expression::Numeric(cmp) => write!(f, "{}", cmp),
            Expression::String(cmp) => write!(f, "{}", cmp),
            Expression::Unary(test) => write!(f, "{}", test),
            Expression::Set(set) => write!(f, "{}", set),
            Expression::List(list) => write!(f, "{}", list),
            Expression::Extension(ext) => write!(f, "{}", ext),
            Expression::And(and) => write_joined(f, &and.items, "and"),
            Expression::Or(or) => write_joined(f, &or.items, "or"),
            Expression::Not(neg) => write!(f, "not {}", neg.expr),
        }
    }
}
