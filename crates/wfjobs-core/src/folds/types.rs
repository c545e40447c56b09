//! Fold / job descriptor type.

use serde::{Deserialize, Serialize};

/// One unit of walk-forward work: a named test window and the timestamp from
/// which trading decisions may use data. Folds and their slices share this
/// shape; all timestamps are integer epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fold {
    pub name: String,
    /// Test window start (inclusive).
    pub test_start: i64,
    /// Test window end. Shared with the next fold's start except for the final fold.
    pub test_end: i64,
    /// `test_start` advanced by the embargo; never before `test_start`.
    pub trade_start: i64,
}

impl Fold {
    /// Width of the test window in seconds.
    pub fn span(&self) -> i64 {
        self.test_end - self.test_start
    }

    /// True when the embargo consumes the whole test window.
    pub fn is_degenerate(&self) -> bool {
        self.trade_start > self.test_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_and_degenerate() {
        let f = Fold {
            name: "fold_01".into(),
            test_start: 100,
            test_end: 200,
            trade_start: 150,
        };
        assert_eq!(f.span(), 100);
        assert!(!f.is_degenerate());

        let d = Fold {
            trade_start: 201,
            ..f
        };
        assert!(d.is_degenerate());
    }
}
