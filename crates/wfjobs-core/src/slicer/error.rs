use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SliceError {
    #[error("parts per fold must be at least 1")]
    InvalidParts,
    #[error("fold {name} ends before it starts ({test_start} > {test_end})")]
    InvertedFold {
        name: String,
        test_start: i64,
        test_end: i64,
    },
}
