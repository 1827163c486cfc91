//! # Row-Count Oracle
//!
//! The greedy order builder needs one number per relation: an approximate row
//! count. This module supplies it while insulating the algorithm from the
//! statistics layer entirely.
//!
//! ## Trait Design
//!
//! `TableSource` is the handle a [`Relation`](crate::relation::Relation)
//! carries to its underlying table. It is intentionally a single fallible
//! method behind a trait object: in production it would reach into persisted
//! table statistics (which can be missing, stale, or temporarily unreadable),
//! while tests plug in [`FixedRows`].
//!
//! ## Failure Swallowing
//!
//! A statistics lookup failure is never a planning failure. The oracle maps
//! any [`StatsError`] to the [`UNKNOWN_ROWS`] sentinel (`u64::MAX`), so a
//! relation with unknown size sorts after every sized relation and is only
//! picked when no sized alternative exists. The builder and its caller never
//! see a statistics error type.
//!
//! ## Memoization
//!
//! Lookups may be expensive, and the greedy loop revisits the same candidates
//! across iterations. The count is assumed stable for the duration of one
//! ordering run, so the oracle caches per relation name. A fresh oracle is
//! created per run; nothing survives the call.

use std::collections::HashMap;
use tracing::debug;

use crate::relation::Relation;

/// Sentinel row count for relations whose statistics are unavailable.
pub const UNKNOWN_ROWS: u64 = u64::MAX;

/// Errors from the underlying statistics source.
///
/// These never escape the oracle; they exist so `TableSource` implementations
/// have a concrete type to fail with.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// No statistics have been collected for this table.
    #[error("no statistics available")]
    Unavailable,
    /// The statistics store could not be read.
    #[error("statistics lookup failed: {0}")]
    Io(String),
}

/// Handle to a table's approximate row count.
///
/// Implemented by the host engine over its table metadata; the count is
/// assumed not to change during a single ordering run.
pub trait TableSource: Send + Sync {
    fn row_count_approximation(&self) -> Result<u64, StatsError>;
}

/// In-memory `TableSource` with a fixed row count, for tests and development.
#[derive(Debug, Clone, Copy)]
pub struct FixedRows(pub u64);

impl TableSource for FixedRows {
    fn row_count_approximation(&self) -> Result<u64, StatsError> {
        Ok(self.0)
    }
}

/// Per-run row-count cache that absorbs statistics failures.
///
/// Keyed by relation name (unique within one candidate set). Created inside
/// `best_order` and dropped with it.
#[derive(Debug, Default)]
pub struct RowCountOracle {
    cache: HashMap<String, u64>,
}

impl RowCountOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approximate row count for `relation`, or [`UNKNOWN_ROWS`] if the
    /// underlying source fails.
    pub fn estimate<E>(&mut self, relation: &Relation<E>) -> u64 {
        if let Some(&rows) = self.cache.get(&relation.name) {
            return rows;
        }
        let rows = match relation.source.row_count_approximation() {
            Ok(rows) => rows,
            Err(e) => {
                debug!(relation = %relation.name, error = %e, "row count unavailable, treating as unknown");
                UNKNOWN_ROWS
            }
        };
        self.cache.insert(relation.name.clone(), rows);
        rows
    }
}
