/// How the selector treats null entries in a rule's mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullMaskPolicy {
    /// A null entry does not mark its row.
    #[default]
    AsFalse,
    /// A null entry fails the selection with [`SelectError::NullMask`](crate::SelectError::NullMask).
    Reject,
}

/// Options applied by [`RuleSet::apply`](crate::RuleSet::apply).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub(crate) columns: Option<Vec<String>>,
    pub(crate) null_mask: NullMaskPolicy,
}

impl SelectOptions {
    /// Project the output onto exactly these columns, in this order.
    pub fn columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectOptions {
            columns: Some(columns.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    /// Keep every input column in its original order.
    pub fn all_columns(self) -> Self {
        SelectOptions {
            columns: None,
            ..self
        }
    }

    pub fn null_mask(self, null_mask: NullMaskPolicy) -> Self {
        SelectOptions { null_mask, ..self }
    }

    /// Requested projection, if any.
    pub fn projection(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn null_mask_policy(&self) -> NullMaskPolicy {
        self.null_mask
    }
}
