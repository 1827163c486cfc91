//! # Greedy Order Builder
//!
//! Produces a left-deep join order for a set of candidate relations:
//!
//! 1. **Anchor**: the relation with the smallest approximate row count.
//! 2. **Extension**: repeatedly add the smallest remaining relation that is
//!    directly connected, via an equi-join edge in its condition tree, to at
//!    least one relation already placed.
//! 3. **Refusal**: if no remaining relation is connected, fail with
//!    [`OrderError::DisconnectedCandidates`] instead of silently introducing
//!    a cartesian product.
//!
//! This is a fallback heuristic for join arities too large for exhaustive
//! enumeration: deterministic, O(n² · tree walk), and not cost-based. It
//! never explores alternative orders and never estimates intermediate result
//! sizes beyond the per-table counts.
//!
//! ## Tie-Breaking
//!
//! Minimum selection is a single left-to-right scan keeping the first
//! strictly smaller candidate, so among equal row counts the relation
//! appearing earliest in the input order wins. This makes the output fully
//! deterministic and reproducible.
//!
//! Each call is self-contained: the row-count cache lives inside the call and
//! nothing is shared across invocations.

use tracing::{debug, trace};

use crate::connectivity::connects;
use crate::expr::PredicateNode;
use crate::relation::Relation;
use crate::stats::RowCountOracle;

/// Planning failures from the order builder.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The equi-join graph induced by the predicates does not reach every
    /// remaining candidate from the relations already placed. Proceeding
    /// would require a cartesian product, which this heuristic refuses to
    /// produce; the caller decides whether to fall back to another ordering
    /// strategy or report an error.
    #[error("no remaining relation is connected; refusing to create a cartesian product")]
    DisconnectedCandidates,
}

/// Compute a left-deep join order for `relations`.
///
/// Returns a permutation of the input: index 0 is the outermost relation and
/// every later relation is connected to at least one earlier one. A
/// single-relation input is returned unchanged with no connectivity check;
/// an empty input yields an empty order.
///
/// Statistics failures are absorbed (such relations sort as largest); a
/// disconnected candidate set is a hard error carrying no partial result.
pub fn best_order<E: PredicateNode>(
    relations: Vec<Relation<E>>,
) -> Result<Vec<Relation<E>>, OrderError> {
    debug!(candidates = relations.len(), "picking rule-based join order");

    let mut oracle = RowCountOracle::new();
    let mut remaining = relations;
    let mut ordered: Vec<Relation<E>> = Vec::with_capacity(remaining.len());

    if remaining.is_empty() {
        return Ok(ordered);
    }

    // Anchor: the smallest relation, connectivity not considered.
    let first = smallest(&mut oracle, &remaining, |_| true)
        .unwrap_or(0);
    let anchor = remaining.remove(first);
    trace!(relation = %anchor.name, "anchor selected");
    ordered.push(anchor);

    // Keep adding the smallest relation connected to anything already placed.
    while !remaining.is_empty() {
        let next = smallest(&mut oracle, &remaining, |candidate| {
            is_connected(candidate, &ordered)
        })
        .ok_or(OrderError::DisconnectedCandidates)?;
        let chosen = remaining.remove(next);
        trace!(relation = %chosen.name, position = ordered.len(), "connected relation selected");
        ordered.push(chosen);
    }

    debug!(
        order = ?ordered.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        "join order complete"
    );
    Ok(ordered)
}

/// Index of the eligible relation with the fewest estimated rows.
///
/// Left-to-right scan keeping the first strictly smaller element, so ties
/// resolve to the earliest candidate. `None` if nothing is eligible.
fn smallest<E, F>(
    oracle: &mut RowCountOracle,
    candidates: &[Relation<E>],
    eligible: F,
) -> Option<usize>
where
    F: Fn(&Relation<E>) -> bool,
{
    let mut best: Option<(usize, u64)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        if !eligible(candidate) {
            continue;
        }
        let rows = oracle.estimate(candidate);
        match best {
            Some((_, best_rows)) if rows >= best_rows => {}
            _ => best = Some((i, rows)),
        }
    }
    best.map(|(i, _)| i)
}

/// True iff `candidate`'s own condition tree holds an equi-join edge between
/// the candidate and any already-ordered relation.
///
/// Condition trees are shared per query, so the candidate's tree is
/// effectively the whole query's predicate. A relation without a condition
/// connects to nothing.
fn is_connected<E: PredicateNode>(candidate: &Relation<E>, ordered: &[Relation<E>]) -> bool {
    let Some(condition) = candidate.condition.as_deref() else {
        return false;
    };
    ordered
        .iter()
        .any(|chosen| connects(condition, &candidate.name, &chosen.name))
}
