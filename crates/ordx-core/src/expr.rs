//! # Predicate Expression Model
//!
//! This module defines the scalar expression tree the ordering heuristic reads
//! predicates from, plus the minimal capability surface the rest of the crate
//! actually requires.
//!
//! ## Scalar Expressions (`Expr`)
//!
//! `Expr` is a recursive tree covering the shapes that appear in WHERE clauses
//! and join conditions: column references, literals, comparisons, arithmetic,
//! function calls, and boolean combinators. A query's full condition is built
//! upstream (by the SQL front end) and handed to this crate read-only.
//!
//! ## The `PredicateNode` Capability Trait
//!
//! The connectivity analysis does not care about most of the expression
//! vocabulary. It needs exactly three capabilities from a node:
//!
//! - whether it is an **equality comparison** (the only node kind that can
//!   establish a join edge),
//! - whether it is a **column reference** and, if so, its table qualifier,
//! - generic access to its **subexpressions** so the walk can descend through
//!   anything else (AND, OR, arithmetic, function calls, ...).
//!
//! `PredicateNode` captures that surface. `Expr` implements it, and a host
//! engine with its own expression hierarchy can implement it too and reuse the
//! analyzer and order builder unchanged.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a column, optionally qualified by a table name.
///
/// Only qualified references participate in connectivity analysis: a bare
/// column name cannot be attributed to a relation and never establishes an
/// equi-join edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref t) = self.table {
            write!(f, "{}.{}", t, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Constant literal value appearing in a predicate (e.g., `WHERE x = 42`).
///
/// Uses `OrderedFloat` for `f64` so that expressions containing floating-point
/// literals still derive `Eq` and `Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarValue {
    /// SQL NULL value.
    Null,
    /// Boolean true/false.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit floating point, wrapped in OrderedFloat for Eq/Hash support.
    Float64(OrderedFloat<f64>),
    /// UTF-8 string.
    Utf8(String),
}

/// Comparison operators.
///
/// Only `Eq` establishes connectivity between relations: an equi-join is the
/// one predicate shape that is safe to execute in any order without a cost
/// model. All other comparison kinds are ignored by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equality comparison (`=`).
    Eq,
    /// Inequality comparison (`<>` or `!=`).
    NotEq,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    LtEq,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    GtEq,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Scalar predicate expression tree.
///
/// Comparisons are modeled separately from arithmetic so that the equality
/// check at the heart of connectivity analysis is a plain variant match rather
/// than an operator-class test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to a column, optionally table-qualified.
    Column(ColumnRef),
    /// Constant literal value.
    Literal(ScalarValue),
    /// Comparison between two operands (e.g., `a.x = b.y`, `price > 100`).
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Arithmetic operation (e.g., `a + b`, `qty * price`).
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Named function call (e.g., `UPPER(name)`, `ABS(value)`).
    Function { name: String, args: Vec<Expr> },
    /// Conjunction (AND) of multiple predicates, stored flat.
    And(Vec<Expr>),
    /// Disjunction (OR) of multiple predicates.
    Or(Vec<Expr>),
}

impl Expr {
    /// A table-qualified column reference.
    pub fn column(table: &str, name: &str) -> Expr {
        Expr::Column(ColumnRef {
            table: Some(table.into()),
            name: name.into(),
        })
    }

    /// An unqualified column reference.
    pub fn bare_column(name: &str) -> Expr {
        Expr::Column(ColumnRef {
            table: None,
            name: name.into(),
        })
    }

    /// An equi-join condition: `left_table.left_col = right_table.right_col`.
    pub fn equi_join(left_table: &str, left_col: &str, right_table: &str, right_col: &str) -> Expr {
        Expr::Comparison {
            op: CompareOp::Eq,
            left: Box::new(Expr::column(left_table, left_col)),
            right: Box::new(Expr::column(right_table, right_col)),
        }
    }
}

/// What the ordering heuristic needs to know about a single expression node.
///
/// The borrowed qualifier in `Column` keeps `kind()` allocation-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// A comparison node with the given operator. Operands are children 0 and 1.
    Comparison(CompareOp),
    /// A column reference with an optional table qualifier.
    Column(Option<&'a str>),
    /// Any other node; descended generically via its children.
    Other,
}

/// Minimal capability surface over a host expression hierarchy.
///
/// The analyzer walks trees through this trait only, so it works against any
/// engine's expression representation, not just [`Expr`].
pub trait PredicateNode {
    /// Classify this node for the connectivity walk.
    fn kind(&self) -> NodeKind<'_>;

    /// Number of direct subexpressions.
    fn child_count(&self) -> usize;

    /// The `i`-th direct subexpression. Callers stay within `child_count()`.
    fn child(&self, i: usize) -> &Self;
}

impl PredicateNode for Expr {
    fn kind(&self) -> NodeKind<'_> {
        match self {
            Expr::Comparison { op, .. } => NodeKind::Comparison(*op),
            Expr::Column(c) => NodeKind::Column(c.table.as_deref()),
            _ => NodeKind::Other,
        }
    }

    fn child_count(&self) -> usize {
        match self {
            Expr::Column(_) | Expr::Literal(_) => 0,
            Expr::Comparison { .. } | Expr::Arith { .. } => 2,
            Expr::Function { args, .. } => args.len(),
            Expr::And(exprs) | Expr::Or(exprs) => exprs.len(),
        }
    }

    fn child(&self, i: usize) -> &Self {
        match self {
            Expr::Comparison { left, right, .. } | Expr::Arith { left, right, .. } => {
                if i == 0 {
                    left
                } else {
                    right
                }
            }
            Expr::Function { args, .. } => &args[i],
            Expr::And(exprs) | Expr::Or(exprs) => &exprs[i],
            Expr::Column(_) | Expr::Literal(_) => {
                panic!("leaf expression has no child {i}")
            }
        }
    }
}
