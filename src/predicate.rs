//! Row predicates: opaque callables turning a table into a row mask.

use std::{any::type_name, borrow::Cow, fmt};

use arrow::{array::BooleanArray, error::ArrowError};

use crate::table::Table;

/// Which rule list a predicate was registered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleSide {
    /// Rows marked here are candidates for selection.
    Include,
    /// Rows marked here are never selected.
    Exclude,
}

impl RuleSide {
    /// Lowercase label used in logs and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RuleSide::Include => "include",
            RuleSide::Exclude => "exclude",
        }
    }
}

impl fmt::Display for RuleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure function from a table to a mask with one entry per row.
///
/// Implementations must not depend on evaluation order or on other
/// predicates. The returned mask must be exactly `table.num_rows()` long;
/// the selector rejects anything else instead of padding or truncating.
pub trait RowPredicate: Send + Sync {
    /// Mark the rows of `table` that satisfy this predicate.
    fn evaluate(&self, table: &Table) -> Result<BooleanArray, ArrowError>;

    /// Name reported when this predicate misbehaves.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(type_name::<Self>())
    }
}

/// Adapter for fallible closures.
#[derive(Clone)]
pub struct FnPredicate<F> {
    func: F,
}

impl<F> RowPredicate for FnPredicate<F>
where
    F: Fn(&Table) -> Result<BooleanArray, ArrowError> + Send + Sync,
{
    fn evaluate(&self, table: &Table) -> Result<BooleanArray, ArrowError> {
        (self.func)(table)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(type_name::<F>())
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate")
            .field("func", &type_name::<F>())
            .finish()
    }
}

/// Wrap a fallible closure as a [`RowPredicate`].
pub fn predicate_fn<F>(func: F) -> FnPredicate<F>
where
    F: Fn(&Table) -> Result<BooleanArray, ArrowError> + Send + Sync,
{
    FnPredicate { func }
}

/// Adapter for closures that cannot fail.
#[derive(Clone)]
pub struct MaskFn<F> {
    func: F,
}

impl<F> RowPredicate for MaskFn<F>
where
    F: Fn(&Table) -> BooleanArray + Send + Sync,
{
    fn evaluate(&self, table: &Table) -> Result<BooleanArray, ArrowError> {
        Ok((self.func)(table))
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(type_name::<F>())
    }
}

impl<F> fmt::Debug for MaskFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskFn")
            .field("func", &type_name::<F>())
            .finish()
    }
}

/// Wrap an infallible closure as a [`RowPredicate`].
pub fn mask_fn<F>(func: F) -> MaskFn<F>
where
    F: Fn(&Table) -> BooleanArray + Send + Sync,
{
    MaskFn { func }
}

/// Predicate carrying a caller-chosen name for diagnostics.
#[derive(Clone, Debug)]
pub struct Named<P> {
    name: Cow<'static, str>,
    inner: P,
}

impl<P> Named<P> {
    /// Attach `name` to `inner`.
    pub fn new(name: impl Into<Cow<'static, str>>, inner: P) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Borrow the wrapped predicate.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: RowPredicate> RowPredicate for Named<P> {
    fn evaluate(&self, table: &Table) -> Result<BooleanArray, ArrowError> {
        self.inner.evaluate(table)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_ref())
    }
}

/// Shorthand for [`Named::new`].
pub fn named<P: RowPredicate>(name: impl Into<Cow<'static, str>>, inner: P) -> Named<P> {
    Named::new(name, inner)
}

/// A fixed mask ignores the table and always returns itself.
impl RowPredicate for BooleanArray {
    fn evaluate(&self, _table: &Table) -> Result<BooleanArray, ArrowError> {
        Ok(self.clone())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("fixed mask")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Array, ArrayRef, Int64Array};

    use super::*;

    fn table() -> Table {
        Table::try_from_columns([("v", Arc::new(Int64Array::from(vec![1, 5, 9])) as ArrayRef)])
            .expect("table")
    }

    #[test]
    fn mask_fn_evaluates_against_table() {
        let pred = mask_fn(|table: &Table| {
            let v = table
                .column_by_name("v")
                .and_then(|col| col.as_any().downcast_ref::<Int64Array>())
                .expect("int column");
            v.iter().map(|x| x.map(|x| x > 3)).collect()
        });
        let mask = pred.evaluate(&table()).expect("evaluate");
        assert_eq!(mask, BooleanArray::from(vec![false, true, true]));
    }

    #[test]
    fn predicate_fn_forwards_errors() {
        let pred = predicate_fn(|_: &Table| {
            Err(ArrowError::ComputeError("boom".to_string()))
        });
        assert!(pred.evaluate(&table()).is_err());
    }

    #[test]
    fn named_overrides_reported_name() {
        let pred = named("big values", BooleanArray::from(vec![true, false, true]));
        assert_eq!(pred.name(), "big values");
        assert_eq!(pred.inner().len(), 3);
    }

    #[test]
    fn rule_side_labels() {
        assert_eq!(RuleSide::Include.to_string(), "include");
        assert_eq!(RuleSide::Exclude.to_string(), "exclude");
    }
}
