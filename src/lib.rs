//! Rule-based row selection over Arrow record batches.
//!
//! Callers hand rowsift an in-memory [`Table`] and two lists of
//! [`RowPredicate`]s. Each predicate marks rows with a boolean mask; the masks
//! of each list are OR-combined and the result is `include AND NOT exclude`.
//! Exclusion always wins, and an empty include list selects nothing.
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, BooleanArray, Int64Array};
//! use rowsift::{filter, mask_fn, Table};
//!
//! let table = Table::try_from_columns([
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//! ])?;
//! let everything = mask_fn(|t: &Table| BooleanArray::from(vec![true; t.num_rows()]));
//! let second = BooleanArray::from(vec![false, true, false]);
//!
//! let kept = filter(&table, &[&everything], &[&second], None)?;
//! assert_eq!(kept.num_rows(), 2);
//! # Ok::<(), rowsift::SelectError>(())
//! ```

mod error;
pub mod mask;
mod observability;
mod option;
mod predicate;
mod selector;
mod table;

pub use crate::{
    error::SelectError,
    option::{NullMaskPolicy, SelectOptions},
    predicate::{mask_fn, named, predicate_fn, FnPredicate, MaskFn, Named, RowPredicate, RuleSide},
    selector::{filter, RuleSet},
    table::Table,
};
