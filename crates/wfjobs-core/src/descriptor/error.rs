use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("line {line}: expected 4 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: empty job name")]
    EmptyName { line: usize },
    #[error("line {line}: {field} is not an integer timestamp: {value:?}")]
    BadTimestamp {
        line: usize,
        field: &'static str,
        value: String,
    },
}
