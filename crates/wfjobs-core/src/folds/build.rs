//! Fold builder: even division of `[first_ts, last_ts]`.

use super::error::FoldError;
use super::types::Fold;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Deterministic fold name: 1-based ordinal, zero-padded so that lexical
/// order matches chronological order (`fold_01`, `fold_02`, ...).
pub fn fold_name(index: usize, fold_count: usize) -> String {
    let width = fold_count.to_string().len().max(2);
    format!("fold_{:0width$}", index + 1, width = width)
}

/// Splits `[first_ts, last_ts]` into `fold_count` contiguous windows of equal
/// length; the last window ends exactly at `last_ts`.
///
/// Boundaries are computed in floating point from `first_ts` for every fold
/// and only truncated to integers on output, so rounding error does not
/// accumulate across folds. Adjacent folds share their boundary value.
///
/// `trade_start` is `test_start + embargo_days * 86400`, capped at
/// `test_end + 1`. A fold whose embargo swallows the whole window is kept.
pub fn build_folds(
    first_ts: f64,
    last_ts: f64,
    fold_count: usize,
    embargo_days: f64,
) -> Result<Vec<Fold>, FoldError> {
    if !first_ts.is_finite() || !last_ts.is_finite() {
        return Err(FoldError::NonFiniteRange { first_ts, last_ts });
    }
    if last_ts < first_ts {
        return Err(FoldError::InvalidRange { first_ts, last_ts });
    }
    if fold_count == 0 {
        return Err(FoldError::InvalidFoldCount);
    }
    if !embargo_days.is_finite() || embargo_days < 0.0 {
        return Err(FoldError::InvalidEmbargo(embargo_days));
    }

    let window = (last_ts - first_ts) / fold_count as f64;
    let embargo_secs = embargo_days * SECONDS_PER_DAY;
    let boundary = |k: usize| -> f64 {
        if k == fold_count {
            last_ts
        } else {
            first_ts + k as f64 * window
        }
    };

    let folds = (0..fold_count)
        .map(|i| {
            let start = boundary(i);
            let test_start = start as i64;
            let test_end = boundary(i + 1) as i64;
            let trade_start = ((start + embargo_secs) as i64).min(test_end.saturating_add(1));
            Fold {
                name: fold_name(i, fold_count),
                test_start,
                test_end,
                trade_start,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        first_ts,
        last_ts,
        fold_count,
        embargo_days,
        window_secs = window,
        "built walk-forward folds"
    );
    Ok(folds)
}
