//! Boolean row masks and the kernels that combine them.
//!
//! A mask is an Arrow [`BooleanArray`] positionally aligned with a table's
//! rows. Combination always works on null-free masks; callers strip nulls
//! before folding.

use arrow::{
    array::{Array, BooleanArray},
    buffer::BooleanBuffer,
    compute::kernels::{boolean, filter::prep_null_mask_filter},
    error::ArrowError,
};

/// Mask of `len` rows with nothing marked.
#[must_use]
pub fn all_false(len: usize) -> BooleanArray {
    BooleanArray::new(BooleanBuffer::new_unset(len), None)
}

/// Row-wise OR across `masks`.
///
/// The fold starts from [`all_false`], so an empty iterator marks no rows.
///
/// # Errors
/// Returns an error if any mask is not `len` entries long.
pub fn union<I>(len: usize, masks: I) -> Result<BooleanArray, ArrowError>
where
    I: IntoIterator<Item = BooleanArray>,
{
    masks
        .into_iter()
        .try_fold(all_false(len), |acc, mask| boolean::or(&acc, &mask))
}

/// Rows marked in `include` and not marked in `exclude`.
///
/// # Errors
/// Returns an error if the masks differ in length.
pub fn and_not(include: &BooleanArray, exclude: &BooleanArray) -> Result<BooleanArray, ArrowError> {
    boolean::and_not(include, exclude)
}

/// Replace null entries with `false`.
#[must_use]
pub fn strip_nulls(mask: &BooleanArray) -> BooleanArray {
    if mask.null_count() == 0 {
        mask.clone()
    } else {
        prep_null_mask_filter(mask)
    }
}

/// Number of marked rows.
#[must_use]
pub fn count_set(mask: &BooleanArray) -> usize {
    mask.true_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(mask: &BooleanArray) -> Vec<usize> {
        (0..mask.len())
            .filter(|&idx| mask.is_valid(idx) && mask.value(idx))
            .collect()
    }

    #[test]
    fn union_of_nothing_marks_nothing() {
        let mask = union(4, Vec::<BooleanArray>::new()).expect("union");
        assert_eq!(mask.len(), 4);
        assert!(marked(&mask).is_empty());
    }

    #[test]
    fn union_counts_overlap_once() {
        let p1 = BooleanArray::from(vec![true, false, true, false]);
        let p2 = BooleanArray::from(vec![false, true, true, false]);
        let mask = union(4, [p1, p2]).expect("union");
        assert_eq!(marked(&mask), vec![0, 1, 2]);
        assert_eq!(count_set(&mask), 3);
    }

    #[test]
    fn union_rejects_length_mismatch() {
        let short = BooleanArray::from(vec![true]);
        assert!(union(3, [short]).is_err());
    }

    #[test]
    fn and_not_gives_exclusion_priority() {
        let include = BooleanArray::from(vec![true, true, true, false]);
        let exclude = BooleanArray::from(vec![false, false, true, true]);
        let mask = and_not(&include, &exclude).expect("and_not");
        assert_eq!(marked(&mask), vec![0, 1]);
    }

    #[test]
    fn strip_nulls_turns_nulls_false() {
        let mask = BooleanArray::from(vec![Some(true), None, Some(false), Some(true)]);
        let stripped = strip_nulls(&mask);
        assert_eq!(stripped.null_count(), 0);
        assert_eq!(marked(&stripped), vec![0, 3]);
    }
}
