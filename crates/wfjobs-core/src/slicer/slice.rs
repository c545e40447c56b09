//! Ceiling-step slicing of a fold's `[test_start, test_end]` range.

use super::error::SliceError;
use crate::folds::Fold;

/// A slice has the same shape as the fold it was cut from.
pub type JobSlice = Fold;

/// `<fold_name>_p<index>` with a 1-based index.
pub fn slice_name(fold_name: &str, index: usize) -> String {
    format!("{}_p{}", fold_name, index + 1)
}

/// Splits `fold` into at most `parts` contiguous slices.
///
/// `step = ceil(span / parts)`; slice `i` covers
/// `[start + i*step, min(end, start + (i+1)*step - 1)]`. Slices that would
/// start past `test_end` are omitted, which happens when `parts` exceeds the
/// number of whole steps. A zero-span fold yields a single slice with the
/// fold's bounds.
pub fn slice_fold(fold: &Fold, parts: usize) -> Result<Vec<JobSlice>, SliceError> {
    if parts == 0 {
        return Err(SliceError::InvalidParts);
    }
    let (start, end) = (fold.test_start, fold.test_end);
    if end < start {
        return Err(SliceError::InvertedFold {
            name: fold.name.clone(),
            test_start: start,
            test_end: end,
        });
    }

    let span = end - start;
    if span == 0 {
        return Ok(vec![Fold {
            name: slice_name(&fold.name, 0),
            ..fold.clone()
        }]);
    }

    // A step is at least one unit, so no more than `span + 1` slices can be non-empty.
    let max_slices = u64::try_from(span).map_or(u64::MAX, |s| s.saturating_add(1));
    let parts = (parts as u64).min(max_slices);
    let parts_i = i64::try_from(parts).unwrap_or(i64::MAX);
    let step = span / parts_i + i64::from(span % parts_i != 0);

    let mut out = Vec::with_capacity(usize::try_from(parts).unwrap_or(0));
    for i in 0..parts_i {
        let slice_start = start + i * step;
        let slice_end = end.min(slice_start + step - 1);
        if slice_start > slice_end {
            break;
        }
        out.push(Fold {
            name: slice_name(&fold.name, i as usize),
            test_start: slice_start,
            test_end: slice_end,
            trade_start: fold.trade_start.max(slice_start),
        });
    }
    Ok(out)
}

/// Slices every fold in order; fails on the first invalid fold.
pub fn slice_all(folds: &[Fold], parts: usize) -> Result<Vec<JobSlice>, SliceError> {
    let mut out = Vec::with_capacity(folds.len());
    for fold in folds {
        let slices = slice_fold(fold, parts)?;
        if slices.len() < parts {
            tracing::debug!(
                fold = %fold.name,
                parts,
                emitted = slices.len(),
                "fold too narrow for requested parts; trailing slices omitted"
            );
        }
        out.extend(slices);
    }
    Ok(out)
}
