//! Combine inclusion and exclusion rules into one row selection.
//!
//! Every rule in a list is evaluated against the whole table and the masks
//! are OR-folded. The final mask is `include AND NOT exclude`, so a row
//! marked by any exclusion rule never survives. An empty include list marks
//! nothing: there is no implicit "select everything".

use std::{fmt, sync::Arc};

use arrow::array::{Array, BooleanArray};

use crate::{
    error::SelectError,
    mask,
    observability::{log_debug, log_trace, log_warn},
    option::{NullMaskPolicy, SelectOptions},
    predicate::{RowPredicate, RuleSide},
    table::Table,
};

/// Select rows of `table` marked by any `include` rule and by no `exclude`
/// rule, optionally projected onto `columns`.
///
/// Projection names are checked before any rule runs. Null mask entries count
/// as unmarked; use [`RuleSet`] with [`SelectOptions`] to change that.
///
/// # Errors
/// - [`SelectError::UnknownColumn`] if a projection column is missing.
/// - [`SelectError::ShapeMismatch`] if a rule's mask length differs from the
///   row count.
/// - [`SelectError::Predicate`] if a rule fails on its own.
pub fn filter(
    table: &Table,
    include: &[&dyn RowPredicate],
    exclude: &[&dyn RowPredicate],
    columns: Option<&[&str]>,
) -> Result<Table, SelectError> {
    run(
        table,
        include.iter().copied(),
        exclude.iter().copied(),
        columns,
        NullMaskPolicy::default(),
    )
}

/// Reusable inclusion/exclusion rules plus output options.
///
/// Rules are shared behind `Arc`, so cloning a rule set is cheap and a rule
/// set can be applied from several threads at once.
#[derive(Clone, Default)]
pub struct RuleSet {
    include: Vec<Arc<dyn RowPredicate>>,
    exclude: Vec<Arc<dyn RowPredicate>>,
    options: SelectOptions,
}

impl RuleSet {
    /// Rule set with no rules; applying it selects nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inclusion rule.
    #[must_use]
    pub fn include<P>(self, rule: P) -> Self
    where
        P: RowPredicate + 'static,
    {
        self.include_shared(Arc::new(rule))
    }

    #[must_use]
    pub fn include_shared(mut self, rule: Arc<dyn RowPredicate>) -> Self {
        self.include.push(rule);
        self
    }

    /// Append an exclusion rule.
    #[must_use]
    pub fn exclude<P>(self, rule: P) -> Self
    where
        P: RowPredicate + 'static,
    {
        self.exclude_shared(Arc::new(rule))
    }

    #[must_use]
    pub fn exclude_shared(mut self, rule: Arc<dyn RowPredicate>) -> Self {
        self.exclude.push(rule);
        self
    }

    /// Project the output onto exactly these columns, in this order.
    #[must_use]
    pub fn columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleSet {
            options: self.options.clone().columns(columns),
            ..self
        }
    }

    /// Replace the output options wholesale.
    #[must_use]
    pub fn options(self, options: SelectOptions) -> Self {
        RuleSet { options, ..self }
    }

    pub fn select_options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn include_len(&self) -> usize {
        self.include.len()
    }

    pub fn exclude_len(&self) -> usize {
        self.exclude.len()
    }

    /// Final row mask for `table` without materializing the selection.
    ///
    /// # Errors
    /// Same as [`RuleSet::apply`], except that the projection is not checked.
    pub fn mask(&self, table: &Table) -> Result<BooleanArray, SelectError> {
        combine(
            table,
            self.include.iter().map(as_dyn),
            self.exclude.iter().map(as_dyn),
            self.options.null_mask,
        )
    }

    /// Select the surviving rows of `table`.
    ///
    /// # Errors
    /// See [`filter`]; additionally [`SelectError::NullMask`] when the options
    /// reject null mask entries.
    pub fn apply(&self, table: &Table) -> Result<Table, SelectError> {
        run(
            table,
            self.include.iter().map(as_dyn),
            self.exclude.iter().map(as_dyn),
            self.options.projection(),
            self.options.null_mask,
        )
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("include", &rule_names(&self.include))
            .field("exclude", &rule_names(&self.exclude))
            .field("options", &self.options)
            .finish()
    }
}

fn rule_names(rules: &[Arc<dyn RowPredicate>]) -> Vec<String> {
    rules.iter().map(|rule| rule.name().into_owned()).collect()
}

fn as_dyn(rule: &Arc<dyn RowPredicate>) -> &dyn RowPredicate {
    rule.as_ref()
}

fn run<'i, 'e, I, E, S>(
    table: &Table,
    include: I,
    exclude: E,
    columns: Option<&[S]>,
    policy: NullMaskPolicy,
) -> Result<Table, SelectError>
where
    I: IntoIterator<Item = &'i dyn RowPredicate>,
    E: IntoIterator<Item = &'e dyn RowPredicate>,
    S: AsRef<str>,
{
    let projection = columns
        .map(|columns| table.resolve_columns(columns))
        .transpose()?;
    let selected = combine(table, include, exclude, policy)?;
    let output = match projection {
        Some(indices) => table.project_indices(&indices)?.select(&selected)?,
        None => table.select(&selected)?,
    };
    log_debug!(
        component = "selector",
        event = "selection_finished",
        rows_in = table.num_rows(),
        rows_out = output.num_rows(),
        columns_out = output.num_columns(),
    );
    Ok(output)
}

fn combine<'i, 'e, I, E>(
    table: &Table,
    include: I,
    exclude: E,
    policy: NullMaskPolicy,
) -> Result<BooleanArray, SelectError>
where
    I: IntoIterator<Item = &'i dyn RowPredicate>,
    E: IntoIterator<Item = &'e dyn RowPredicate>,
{
    let (included, include_rules) = evaluate_side(table, RuleSide::Include, include, policy)?;
    let (excluded, exclude_rules) = evaluate_side(table, RuleSide::Exclude, exclude, policy)?;
    if include_rules == 0 {
        log_debug!(
            component = "selector",
            event = "empty_include",
            rows = table.num_rows(),
        );
    }
    let selected = mask::and_not(&included, &excluded)?;
    log_debug!(
        component = "selector",
        event = "rules_combined",
        rows = table.num_rows(),
        include_rules,
        exclude_rules,
        included = mask::count_set(&included),
        excluded = mask::count_set(&excluded),
        selected = mask::count_set(&selected),
    );
    Ok(selected)
}

/// OR-fold every rule on one side; returns the mask and the rule count.
fn evaluate_side<'a, I>(
    table: &Table,
    side: RuleSide,
    rules: I,
    policy: NullMaskPolicy,
) -> Result<(BooleanArray, usize), SelectError>
where
    I: IntoIterator<Item = &'a dyn RowPredicate>,
{
    let mut masks = Vec::new();
    for (index, rule) in rules.into_iter().enumerate() {
        masks.push(evaluate_rule(table, side, index, rule, policy)?);
    }
    let count = masks.len();
    Ok((mask::union(table.num_rows(), masks)?, count))
}

fn evaluate_rule(
    table: &Table,
    side: RuleSide,
    index: usize,
    rule: &dyn RowPredicate,
    policy: NullMaskPolicy,
) -> Result<BooleanArray, SelectError> {
    let rows = table.num_rows();
    let marked = rule
        .evaluate(table)
        .map_err(|source| SelectError::Predicate {
            side,
            index,
            name: rule.name().into_owned(),
            source,
        })?;
    if marked.len() != rows {
        return Err(SelectError::ShapeMismatch {
            side,
            index,
            name: rule.name().into_owned(),
            expected: rows,
            actual: marked.len(),
        });
    }

    let nulls = marked.null_count();
    let name = rule.name();
    log_trace!(
        component = "selector",
        event = "rule_evaluated",
        side = %side,
        index,
        rule = %name,
        marked = mask::count_set(&marked),
        nulls,
    );
    if nulls == 0 {
        return Ok(marked);
    }
    match policy {
        NullMaskPolicy::Reject => Err(SelectError::NullMask {
            side,
            index,
            name: name.into_owned(),
            nulls,
        }),
        NullMaskPolicy::AsFalse => {
            log_warn!(
                component = "selector",
                event = "null_mask_entries",
                side = %side,
                index,
                rule = %name,
                nulls,
            );
            Ok(mask::strip_nulls(&marked))
        }
    }
}
