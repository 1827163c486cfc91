//! # Relations
//!
//! A [`Relation`] is one participant in a multi-way join: a table scan or
//! filtered scan the planner wants to place into a left-deep order. Relations
//! are built upstream during query compilation and handed to this crate
//! read-only.

use std::fmt;
use std::sync::Arc;

use crate::expr::Expr;
use crate::stats::TableSource;

/// A join participant.
///
/// Generic over the predicate representation `E` so host engines can carry
/// their own expression type; defaults to this crate's [`Expr`].
pub struct Relation<E = Expr> {
    /// Unique name within the candidate set. This is the identity used for
    /// connectivity matching, not object identity.
    pub name: String,
    /// Handle to the underlying table's statistics.
    pub source: Arc<dyn TableSource>,
    /// The query's full condition tree, shared by reference across all
    /// relations of the same query. `None` means this relation carries no
    /// predicate and can only ever be chosen as the anchor.
    pub condition: Option<Arc<E>>,
}

impl<E> Relation<E> {
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn TableSource>,
        condition: Option<Arc<E>>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            condition,
        }
    }
}

// Manual impl: the handles clone regardless of whether `E` itself does.
impl<E> Clone for Relation<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            source: Arc::clone(&self.source),
            condition: self.condition.clone(),
        }
    }
}

impl<E> fmt::Debug for Relation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("name", &self.name)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

impl<E> fmt::Display for Relation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
