//! Immutable, column-labelled table backed by an Arrow `RecordBatch`.

use arrow::{
    array::{Array, ArrayRef, BooleanArray, RecordBatch},
    compute::filter_record_batch,
    datatypes::SchemaRef,
    error::ArrowError,
};

use crate::error::SelectError;

/// In-memory table handed to row predicates and returned by selection.
///
/// The wrapped batch is never mutated; selection and projection build new
/// batches that may share column buffers with the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    /// Wrap an existing record batch.
    #[must_use]
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Assemble a table from a schema and its columns.
    ///
    /// # Errors
    /// Returns [`SelectError::InvalidInput`] when the columns disagree with the
    /// schema or with each other in length.
    pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Self, SelectError> {
        RecordBatch::try_new(schema, columns)
            .map(Self::new)
            .map_err(SelectError::InvalidInput)
    }

    /// Assemble a table from named columns; every field is nullable.
    ///
    /// # Errors
    /// Returns [`SelectError::InvalidInput`] when the columns differ in length.
    pub fn try_from_columns<I, N>(columns: I) -> Result<Self, SelectError>
    where
        I: IntoIterator<Item = (N, ArrayRef)>,
        N: AsRef<str>,
    {
        RecordBatch::try_from_iter(columns)
            .map(Self::new)
            .map_err(SelectError::InvalidInput)
    }

    /// Zero-row table with the given schema.
    #[must_use]
    pub fn empty(schema: SchemaRef) -> Self {
        Self::new(RecordBatch::new_empty(schema))
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Column at the given schema position.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds, like [`RecordBatch::column`].
    pub fn column(&self, index: usize) -> &ArrayRef {
        self.batch.column(index)
    }

    /// Column with the given name, if present.
    pub fn column_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Schema position of the named column.
    ///
    /// # Errors
    /// Returns [`SelectError::UnknownColumn`] when no field carries that name.
    pub fn index_of(&self, name: &str) -> Result<usize, SelectError> {
        self.batch
            .schema_ref()
            .column_with_name(name)
            .map(|(index, _)| index)
            .ok_or_else(|| SelectError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Resolve every requested name to its schema position, in request order.
    pub(crate) fn resolve_columns<S>(&self, columns: &[S]) -> Result<Vec<usize>, SelectError>
    where
        S: AsRef<str>,
    {
        columns
            .iter()
            .map(|name| self.index_of(name.as_ref()))
            .collect()
    }

    /// Keep exactly the named columns, in the given order.
    ///
    /// Repeated names repeat the column; an empty list keeps the row count
    /// with no columns.
    ///
    /// # Errors
    /// Returns [`SelectError::UnknownColumn`] for the first missing name.
    pub fn project<S>(&self, columns: &[S]) -> Result<Table, SelectError>
    where
        S: AsRef<str>,
    {
        let indices = self.resolve_columns(columns)?;
        self.project_indices(&indices)
    }

    pub(crate) fn project_indices(&self, indices: &[usize]) -> Result<Table, SelectError> {
        Ok(Self::new(self.batch.project(indices)?))
    }

    /// Keep the rows whose mask entry is true, preserving their order.
    ///
    /// Null mask entries drop the row.
    ///
    /// # Errors
    /// Returns [`SelectError::Arrow`] when the mask length differs from the
    /// row count.
    pub fn select(&self, mask: &BooleanArray) -> Result<Table, SelectError> {
        if mask.len() != self.num_rows() {
            return Err(ArrowError::InvalidArgumentError(format!(
                "selection mask of length {} does not match {} rows",
                mask.len(),
                self.num_rows()
            ))
            .into());
        }
        Ok(Self::new(filter_record_batch(&self.batch, mask)?))
    }

    /// Borrow the underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Unwrap into the underlying record batch.
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }
}

impl From<RecordBatch> for Table {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl From<Table> for RecordBatch {
    fn from(table: Table) -> Self {
        table.batch
    }
}

impl AsRef<RecordBatch> for Table {
    fn as_ref(&self) -> &RecordBatch {
        &self.batch
    }
}
