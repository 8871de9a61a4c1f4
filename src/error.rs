use arrow::error::ArrowError;
use thiserror::Error;

use crate::predicate::RuleSide;

/// Errors surfaced while selecting rows from a [`Table`](crate::Table).
///
/// Every variant aborts the whole selection; no partial table is produced.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A rule produced a mask whose length differs from the table's row count.
    #[error("{side} rule #{index} ({name}) returned a mask of {actual} rows, expected {expected}")]
    ShapeMismatch {
        /// List the rule belongs to.
        side: RuleSide,
        /// Zero-based position of the rule within its list.
        index: usize,
        /// Display name of the rule.
        name: String,
        /// Row count of the table.
        expected: usize,
        /// Length of the returned mask.
        actual: usize,
    },
    /// A requested projection column is not part of the table schema.
    #[error("unknown column: {name}")]
    UnknownColumn {
        /// The missing column name.
        name: String,
    },
    /// A rule failed while evaluating itself against the table.
    #[error("{side} rule #{index} ({name}) failed: {source}")]
    Predicate {
        /// List the rule belongs to.
        side: RuleSide,
        /// Zero-based position of the rule within its list.
        index: usize,
        /// Display name of the rule.
        name: String,
        /// Error reported by the rule.
        #[source]
        source: ArrowError,
    },
    /// A rule returned null mask entries while nulls are rejected.
    #[error("{side} rule #{index} ({name}) returned {nulls} null mask entries")]
    NullMask {
        /// List the rule belongs to.
        side: RuleSide,
        /// Zero-based position of the rule within its list.
        index: usize,
        /// Display name of the rule.
        name: String,
        /// Number of null entries in the mask.
        nulls: usize,
    },
    /// The input table could not be assembled from the supplied parts.
    #[error("invalid input table: {0}")]
    InvalidInput(#[source] ArrowError),
    /// Arrow kernel failure while combining masks or materializing output.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
