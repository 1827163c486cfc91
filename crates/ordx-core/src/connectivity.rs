//! # Equi-Join Connectivity Analysis
//!
//! Decides whether two relations are directly connected by an equi-join edge
//! somewhere in a predicate tree. This is the graph-reasoning half of the
//! ordering heuristic: the join graph is never materialized, it is queried
//! edge-by-edge through [`connects`].
//!
//! ## Edge Definition
//!
//! An edge between relations A and B exists iff the tree contains an equality
//! comparison, at any nesting depth, where the set of table qualifiers
//! reachable inside one operand includes A and the set reachable inside the
//! other includes B (or symmetrically). Taking the *transitive* qualifier set
//! per operand handles composite operands correctly: in
//! `a.x + b.y = c.z`, the left operand connects both `a` and `b` to `c`.
//!
//! ## Descent Rules
//!
//! The walk descends through *every* node kind generically, not just AND/OR.
//! An equality buried under an OR branch, an arithmetic expression, or a
//! function call still counts as an edge. In particular no attempt is made to
//! reason about OR short-circuiting; an edge under an OR always connects.
//! Only `CompareOp::Eq` comparisons establish edges; range and inequality
//! comparisons are traversed but contribute nothing themselves.
//!
//! The walk is a pure recursive function over the [`PredicateNode`] capability
//! surface, with no shared state.

use std::collections::HashSet;

use crate::expr::{CompareOp, NodeKind, PredicateNode};

/// True iff `expr` contains an equality comparison connecting `name_a` and
/// `name_b`.
///
/// Symmetric in the two names. A caller holding no condition tree should
/// treat the relation as connected to nothing (there is no edge without a
/// predicate).
pub fn connects<E: PredicateNode>(expr: &E, name_a: &str, name_b: &str) -> bool {
    if expr.kind() == NodeKind::Comparison(CompareOp::Eq) && expr.child_count() >= 2 {
        let left = referenced_tables(expr.child(0));
        let right = referenced_tables(expr.child(1));
        if (left.contains(name_a) && right.contains(name_b))
            || (left.contains(name_b) && right.contains(name_a))
        {
            return true;
        }
    }
    (0..expr.child_count()).any(|i| connects(expr.child(i), name_a, name_b))
}

/// Table qualifiers of every column reference in the subtree rooted at `expr`.
///
/// Unqualified column references contribute nothing.
pub fn referenced_tables<E: PredicateNode>(expr: &E) -> HashSet<String> {
    let mut out = HashSet::new();
    collect_tables(expr, &mut out);
    out
}

fn collect_tables<E: PredicateNode>(expr: &E, out: &mut HashSet<String>) {
    if let NodeKind::Column(Some(table)) = expr.kind() {
        out.insert(table.to_string());
    }
    for i in 0..expr.child_count() {
        collect_tables(expr.child(i), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ArithOp, Expr};

    #[test]
    fn test_simple_equality_connects_both_directions() {
        let cond = Expr::equi_join("customers", "customer_id", "orders", "customer_id");
        assert!(connects(&cond, "customers", "orders"));
        assert!(connects(&cond, "orders", "customers"));
        assert!(!connects(&cond, "customers", "products"));
    }

    #[test]
    fn test_edge_found_under_nested_combinators() {
        let cond = Expr::And(vec![
            Expr::Comparison {
                op: CompareOp::Gt,
                left: Box::new(Expr::column("orders", "total")),
                right: Box::new(Expr::column("customers", "credit_limit")),
            },
            Expr::Or(vec![
                Expr::Literal(crate::expr::ScalarValue::Bool(false)),
                Expr::equi_join("orders", "customer_id", "customers", "customer_id"),
            ]),
        ]);
        // The Gt comparison is not an edge; the Eq under the OR is.
        assert!(connects(&cond, "customers", "orders"));
    }

    #[test]
    fn test_non_equality_comparisons_do_not_connect() {
        let cond = Expr::Comparison {
            op: CompareOp::Lt,
            left: Box::new(Expr::column("a", "x")),
            right: Box::new(Expr::column("b", "y")),
        };
        assert!(!connects(&cond, "a", "b"));
    }

    #[test]
    fn test_composite_operand_connects_every_referenced_table() {
        // a.x + b.y = c.z — the left operand references both a and b.
        let cond = Expr::Comparison {
            op: CompareOp::Eq,
            left: Box::new(Expr::Arith {
                op: ArithOp::Add,
                left: Box::new(Expr::column("a", "x")),
                right: Box::new(Expr::column("b", "y")),
            }),
            right: Box::new(Expr::column("c", "z")),
        };
        assert!(connects(&cond, "a", "c"));
        assert!(connects(&cond, "b", "c"));
        // Both sides of the edge must come from opposite operands.
        assert!(!connects(&cond, "a", "b"));
    }

    #[test]
    fn test_unqualified_columns_never_connect() {
        let cond = Expr::Comparison {
            op: CompareOp::Eq,
            left: Box::new(Expr::bare_column("customer_id")),
            right: Box::new(Expr::column("orders", "customer_id")),
        };
        assert!(!connects(&cond, "customers", "orders"));
    }

    #[test]
    fn test_referenced_tables_walks_functions_and_arithmetic() {
        let expr = Expr::Function {
            name: "coalesce".into(),
            args: vec![
                Expr::column("orders", "ship_date"),
                Expr::Arith {
                    op: ArithOp::Sub,
                    left: Box::new(Expr::column("orders", "order_date")),
                    right: Box::new(Expr::column("calendar", "offset")),
                },
                Expr::bare_column("fallback"),
            ],
        };
        let tables = referenced_tables(&expr);
        assert_eq!(tables.len(), 2);
        assert!(tables.contains("orders"));
        assert!(tables.contains("calendar"));
    }
}
