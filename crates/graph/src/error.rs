use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Token {token_index} has head {head_index} outside of a {len}-token sequence")]
    HeadOutOfRange {
        token_index: usize,
        head_index: usize,
        len: usize,
    },

    #[error("Unknown dependency label: {0}")]
    UnknownLabel(String),
}
