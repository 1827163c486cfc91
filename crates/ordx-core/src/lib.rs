//! # ordx-core: Rule-Based Join Order Heuristic
//!
//! This crate implements the greedy join-order heuristic a relational query
//! planner falls back to when the join arity is too large for exhaustive
//! cost-based enumeration. Given the relations participating in a multi-way
//! join and the query's predicate tree, it produces a deterministic left-deep
//! order: start from the smallest relation, then repeatedly add the smallest
//! relation still reachable through an equi-join predicate — and refuse to
//! proceed, rather than emit a hidden cartesian product, if nothing is
//! reachable.
//!
//! ## Module Overview
//!
//! - **`expr`**: Predicate expression tree and the `PredicateNode` capability
//!   trait the analyzer consumes, so host engines can plug in their own
//!   expression hierarchy.
//! - **`relation`**: The `Relation` type — a join participant carrying its
//!   name, a statistics handle, and the query's shared condition tree.
//! - **`stats`**: The row-count oracle. Wraps the fallible statistics source
//!   and converts every failure into a "largest possible" sentinel.
//! - **`connectivity`**: Recursive equi-join connectivity analysis over a
//!   predicate tree.
//! - **`order`**: The greedy order builder, `best_order`, and its failure
//!   policy for disconnected join graphs.

pub mod connectivity;
pub mod expr;
pub mod order;
pub mod relation;
pub mod stats;

pub use order::{best_order, OrderError};
pub use relation::Relation;
